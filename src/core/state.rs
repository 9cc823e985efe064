use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::config::{AuthConfig, PaginationConfig};
use crate::features::auth::services::{AuthService, IdentityService, TokenService};
use crate::features::user_profiles::UserProfileRepository;

/// Shared application state handed to every router.
///
/// Region-scoped repositories are not stored here; handlers bind them per
/// request from the pool and the caller's region claim.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: AuthConfig, pagination: PaginationConfig) -> Self {
        let identity_service = IdentityService::new(pool.clone(), auth.bcrypt_cost);
        let profile_repository = UserProfileRepository::new(pool.clone());
        let token_service = TokenService::new(auth);

        let auth_service = Arc::new(AuthService::new(
            pool.clone(),
            identity_service,
            profile_repository,
            token_service,
        ));

        Self {
            pool,
            auth_service,
            pagination,
        }
    }
}
