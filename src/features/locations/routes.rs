use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::locations::handlers;

/// Create routes for the locations feature
///
/// Note: Every route requires a bearer token carrying a region claim
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/locations",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/locations/{id}",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
        .route(
            "/locations/{id}/gardencentres",
            get(handlers::list_location_garden_centres),
        )
        .with_state(state)
}
