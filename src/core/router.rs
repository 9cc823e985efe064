use std::sync::Arc;

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};

use crate::core::middleware;
use crate::core::state::AppState;
use crate::features::auth::{routes as auth_routes, JwtValidator};
use crate::features::garden_centres::routes as garden_centres_routes;
use crate::features::locations::routes as locations_routes;
use crate::shared::constants::API_VERSION;

/// Simple health check endpoint (no auth required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Assemble every API route.
///
/// Data routes live under `/{API_VERSION}` and, like `/auth/me`, sit behind
/// the bearer auth middleware. Cross-cutting layers and the Swagger UI are
/// added by the caller.
pub fn build_router(state: AppState, validator: JwtValidator) -> Router {
    let validator = Arc::new(validator);

    let versioned = Router::new()
        .merge(garden_centres_routes::routes(state.clone()))
        .merge(locations_routes::routes(state.clone()));

    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .nest(&format!("/{}", API_VERSION), versioned)
        .route_layer(from_fn_with_state(validator, middleware::auth_middleware));

    let public_routes = Router::new()
        .merge(auth_routes::public_routes(state.auth_service.clone()))
        .route("/health", get(health_check));

    Router::new().merge(protected_routes).merge(public_routes)
}
