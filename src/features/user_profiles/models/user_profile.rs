use sqlx::FromRow;

use crate::core::error::{AppError, Result};
use crate::shared::region::Region;

/// Region tag attached to an identity record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserProfile {
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub region: Region,
}

impl UserProfile {
    /// Build a profile from raw input, rejecting anything outside US/UK
    pub fn new(user_id: impl Into<String>, region: &str) -> Result<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(AppError::Validation(
                "UserProfile.UserId cannot be null or empty.".to_string(),
            ));
        }

        Ok(Self {
            user_id,
            region: region.parse()?,
        })
    }
}
