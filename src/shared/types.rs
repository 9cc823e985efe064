use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::MAX_PAGE_SIZE;

/// Error envelope returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: String, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message,
            errors,
        }
    }
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination query parameters for list endpoints.
///
/// Both values are optional; the handler decides the defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    pub page: Option<i64>,

    /// Number of items per page (default: configured page size, max: 100)
    pub page_size: Option<i64>,
}

impl PaginationQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Page size with the configured default for missing or non-positive values
    pub fn page_size_or(&self, default_page_size: i64) -> i64 {
        match self.page_size {
            Some(size) if size > 0 => size.min(MAX_PAGE_SIZE),
            _ => default_page_size,
        }
    }
}

/// One page of results plus the figures a client needs to page further
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub data: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, total_count: i64, current_page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_count + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            total_count,
            total_pages,
            current_page,
            page_size,
            data,
        }
    }
}
