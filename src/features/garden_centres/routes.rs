use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::garden_centres::handlers;

/// Create routes for the garden centres feature
///
/// Note: Every route requires a bearer token carrying a region claim
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/gardencentres",
            get(handlers::list_garden_centres).post(handlers::create_garden_centre),
        )
        .route(
            "/gardencentres/{id}",
            get(handlers::get_garden_centre)
                .put(handlers::update_garden_centre)
                .delete(handlers::delete_garden_centre),
        )
        .with_state(state)
}
