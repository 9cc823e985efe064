use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::models::Location;
use crate::shared::region::Region;

/// Request DTO for creating a location.
///
/// A `region` sent by the client is ignored; the caller's token decides.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Request DTO for renaming a location
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Response DTO for location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponseDto {
    pub id: i64,
    pub name: String,
    pub region: Region,
}

impl From<Location> for LocationResponseDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            region: l.region,
        }
    }
}
