use sqlx::{SqliteExecutor, SqlitePool};

use crate::core::error::{AppError, Result};
use crate::features::user_profiles::models::UserProfile;

/// Persistence for the region tag of each user
pub struct UserProfileRepository {
    pool: SqlitePool,
}

impl UserProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_user_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        ensure_user_id(user_id)?;

        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT user_id, region
            FROM user_profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user profile: {:?}", e);
            AppError::Database(e)
        })
    }

    #[allow(dead_code)]
    pub async fn add(&self, profile: &UserProfile) -> Result<()> {
        self.add_with(&self.pool, profile).await
    }

    /// Insert on a caller-supplied executor, e.g. an open registration transaction
    pub async fn add_with<'e, E>(&self, executor: E, profile: &UserProfile) -> Result<()>
    where
        E: SqliteExecutor<'e>,
    {
        ensure_user_id(&profile.user_id)?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, region)
            VALUES (?, ?)
            "#,
        )
        .bind(&profile.user_id)
        .bind(profile.region.as_str())
        .execute(executor)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add user profile: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    /// Change the region of an existing profile
    #[allow(dead_code)]
    pub async fn update(&self, profile: &UserProfile) -> Result<()> {
        ensure_user_id(&profile.user_id)?;

        let result = sqlx::query(
            r#"
            UPDATE user_profiles
            SET region = ?
            WHERE user_id = ?
            "#,
        )
        .bind(profile.region.as_str())
        .bind(&profile.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user profile: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User profile for {} not found",
                profile.user_id
            )));
        }

        Ok(())
    }
}

fn ensure_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation(
            "UserId cannot be null or empty.".to_string(),
        ));
    }
    Ok(())
}
