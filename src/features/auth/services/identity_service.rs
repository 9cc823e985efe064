use crate::core::error::{AppError, Result};
use crate::features::auth::model::IdentityUser;
use crate::shared::constants::PASSWORD_MIN_LENGTH;
use crate::shared::validation::USERNAME_REGEX;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Username/password store backing registration and login
pub struct IdentityService {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl IdentityService {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Case-insensitive lookup by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<IdentityUser>> {
        let mut conn = self.pool.acquire().await?;
        find_by_normalized(&mut conn, &normalize(username)).await
    }

    /// Verify a password against the stored bcrypt hash off the async runtime
    pub async fn check_password(&self, user: &IdentityUser, password: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = user.password_hash.clone();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
            .map_err(|e| {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                AppError::Internal("Stored password hash is invalid".to_string())
            })
    }

    /// Create an identity record on `conn`.
    ///
    /// All rule violations are collected and returned together as
    /// [`AppError::Identity`]; nothing is written unless every rule passes.
    pub async fn create_user(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
        password: &str,
    ) -> Result<IdentityUser> {
        let normalized = normalize(username);

        let mut errors = username_errors(username);
        if find_by_normalized(conn, &normalized).await?.is_some() {
            errors.push(format!("Username '{}' is already taken.", username));
        }
        errors.extend(password_errors(password));

        if !errors.is_empty() {
            tracing::info!(
                username = %username,
                failures = errors.len(),
                "Identity creation rejected"
            );
            return Err(AppError::Identity(errors));
        }

        let password_hash = self.hash_password(password).await?;
        let id = Uuid::new_v4().to_string();

        let user = sqlx::query_as::<_, IdentityUser>(
            r#"
            INSERT INTO users (id, username, normalized_username, password_hash)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(&id)
        .bind(username)
        .bind(&normalized)
        .bind(&password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| handle_db_error(e, username))?;

        Ok(user)
    }

    async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Password hash task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }
}

async fn find_by_normalized(
    conn: &mut SqliteConnection,
    normalized_username: &str,
) -> Result<Option<IdentityUser>> {
    sqlx::query_as::<_, IdentityUser>(
        r#"
        SELECT id, username, password_hash
        FROM users
        WHERE normalized_username = ?
        "#,
    )
    .bind(normalized_username)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to look up user: {:?}", e);
        AppError::Database(e)
    })
}

/// Concurrent registrations can both pass the duplicate check; the unique index decides
fn handle_db_error(e: sqlx::Error, username: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::Identity(vec![format!(
                "Username '{}' is already taken.",
                username
            )]);
        }
    }
    AppError::Database(e)
}

fn normalize(username: &str) -> String {
    username.trim().to_uppercase()
}

fn username_errors(username: &str) -> Vec<String> {
    if username.trim().is_empty() {
        return vec!["Username is required.".to_string()];
    }
    if !USERNAME_REGEX.is_match(username) {
        return vec![format!(
            "Username '{}' is invalid, can only contain letters or digits.",
            username
        )];
    }
    Vec::new()
}

fn password_errors(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.push(format!(
            "Passwords must be at least {} characters.",
            PASSWORD_MIN_LENGTH
        ));
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push("Passwords must have at least one non alphanumeric character.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Passwords must have at least one digit ('0'-'9').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
    }

    errors
}
