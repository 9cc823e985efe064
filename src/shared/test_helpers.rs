use std::time::Duration;

use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::core::config::{AuthConfig, PaginationConfig};
use crate::core::database::MIGRATOR;
use crate::core::router::build_router;
use crate::core::state::AppState;
use crate::features::auth::model::TokenClaims;
use crate::features::auth::JwtValidator;
use crate::shared::region::Region;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Fresh in-memory database with migrations applied.
///
/// A single connection that never expires, since every new in-memory
/// connection would otherwise start from an empty database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite");

    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_key: "test-signing-key-that-is-long-enough-for-hs256".to_string(),
        issuer: "garden-centres-test".to_string(),
        audience: "garden-centres-clients".to_string(),
        token_lifetime: Duration::from_secs(3600),
        jwt_leeway: Duration::from_secs(60),
        bcrypt_cost: TEST_BCRYPT_COST,
    }
}

/// Sign arbitrary claims with the test key, bypassing `TokenService`
pub fn mint_token(
    config: &AuthConfig,
    sub: &str,
    region: Option<&str>,
    expires_offset_secs: i64,
) -> String {
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: sub.to_string(),
        region: region.map(str::to_string),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now,
        exp: now + expires_offset_secs,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_key.as_bytes()),
    )
    .expect("sign test token")
}

/// Insert a bare identity row and return its id
pub async fn insert_identity(pool: &SqlitePool, username: &str) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO users (id, username, normalized_username, password_hash) VALUES (?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(username)
    .bind(username.to_uppercase())
    .bind("not-a-real-hash")
    .execute(pool)
    .await
    .expect("insert identity");
    id
}

pub async fn seed_location(pool: &SqlitePool, name: &str, region: Region) -> i64 {
    sqlx::query_scalar("INSERT INTO locations (name, region) VALUES (?, ?) RETURNING id")
        .bind(name)
        .bind(region.as_str())
        .fetch_one(pool)
        .await
        .expect("seed location")
}

pub async fn seed_garden_centre(
    pool: &SqlitePool,
    name: &str,
    location_id: i64,
    region: Region,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO garden_centres (name, location_id, region) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(location_id)
    .bind(region.as_str())
    .fetch_one(pool)
    .await
    .expect("seed garden centre")
}

/// Fully assembled application router over `pool`, with the test signing key
pub fn test_app(pool: SqlitePool) -> Router {
    let auth_config = test_auth_config();
    let validator = JwtValidator::new(&auth_config);
    let state = AppState::new(pool, auth_config, PaginationConfig::default());

    build_router(state, validator)
}
