use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Principal extracted from a validated bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub username: String,
    /// Raw `Region` claim; absent when the token was issued without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Claims carried by issued tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(rename = "Region", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Identity record as stored in the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IdentityUser {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}
