use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, RegisterRequestDto};
use crate::features::auth::services::{IdentityService, TokenService};
use crate::features::user_profiles::models::UserProfile;
use crate::features::user_profiles::UserProfileRepository;
use crate::shared::region::Region;

/// Service for authentication operations (register, login)
pub struct AuthService {
    pool: SqlitePool,
    identity_service: IdentityService,
    profile_repository: UserProfileRepository,
    token_service: TokenService,
}

impl AuthService {
    pub fn new(
        pool: SqlitePool,
        identity_service: IdentityService,
        profile_repository: UserProfileRepository,
        token_service: TokenService,
    ) -> Self {
        Self {
            pool,
            identity_service,
            profile_repository,
            token_service,
        }
    }

    /// Register a new user tagged with a region.
    ///
    /// The identity record and its profile are written in one transaction.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<()> {
        let region: Region = dto.region.parse()?;

        let mut tx = self.pool.begin().await?;

        let user = self
            .identity_service
            .create_user(&mut *tx, &dto.username, &dto.password)
            .await?;

        let profile = UserProfile::new(user.id.clone(), region.as_str())?;
        self.profile_repository
            .add_with(&mut *tx, &profile)
            .await?;

        tx.commit().await?;

        tracing::info!(username = %user.username, region = %region, "User registered");

        Ok(())
    }

    /// Verify credentials and issue a token carrying the user's region
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = self
            .identity_service
            .find_by_username(&dto.username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self
            .identity_service
            .check_password(&user, &dto.password)
            .await?
        {
            tracing::info!(username = %user.username, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }

        let profile = self
            .profile_repository
            .get_by_user_id(&user.id)
            .await?
            .ok_or_else(|| AppError::Validation("User profile not found".to_string()))?;

        let token = self.token_service.issue(&user.username, profile.region)?;

        Ok(LoginResponseDto { token })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid username or password".to_string())
}
