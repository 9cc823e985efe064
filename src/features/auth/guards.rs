//! Authorization guards for region-scoped endpoints.
//!
//! Every data endpoint operates on the caller's region, taken from the
//! `Region` claim of the verified token. The guard only checks that the claim
//! is present; whether the value names a real region is decided when a
//! repository is bound to it.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::REGION_CLAIM;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard yielding the raw region claim of the authenticated caller.
///
/// # Example
/// ```ignore
/// pub async fn handler(RegionClaim(region): RegionClaim) { ... }
/// ```
#[derive(Debug, Clone)]
pub struct RegionClaim(pub String);

impl<S> FromRequestParts<S> for RegionClaim
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        match user.region.as_deref() {
            Some(region) if !region.trim().is_empty() => Ok(RegionClaim(region.to_string())),
            _ => {
                tracing::debug!(
                    username = %user.username,
                    claim = REGION_CLAIM,
                    "Token carries no usable region claim"
                );
                Err(AppError::Unauthorized("Region claim is missing.".to_string()))
            }
        }
    }
}
