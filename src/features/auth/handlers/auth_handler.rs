use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::{ErrorResponse, MessageResponse};
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new user with a region
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 200, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Invalid region or identity rules violated", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<Json<MessageResponse>> {
    service.register(dto).await?;
    Ok(Json(MessageResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error or user profile missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<LoginResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(response))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = MeResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Json<MeResponseDto> {
    Json(MeResponseDto {
        username: user.username,
        region: user.region,
    })
}
