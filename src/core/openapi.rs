use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::garden_centres::{dtos as garden_centres_dtos, handlers as garden_centres_handlers};
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::shared::region::Region;
use crate::shared::types::{ErrorResponse, MessageResponse, PagedResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_me,
        // Garden centres
        garden_centres_handlers::list_garden_centres,
        garden_centres_handlers::get_garden_centre,
        garden_centres_handlers::create_garden_centre,
        garden_centres_handlers::update_garden_centre,
        garden_centres_handlers::delete_garden_centre,
        // Locations
        locations_handlers::list_locations,
        locations_handlers::get_location,
        locations_handlers::list_location_garden_centres,
        locations_handlers::create_location,
        locations_handlers::update_location,
        locations_handlers::delete_location,
    ),
    components(
        schemas(
            // Shared
            Region,
            ErrorResponse,
            MessageResponse,
            // Auth
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::LoginResponseDto,
            auth::dtos::MeResponseDto,
            // Garden centres
            garden_centres_dtos::CreateGardenCentreDto,
            garden_centres_dtos::UpdateGardenCentreDto,
            garden_centres_dtos::GardenCentreResponseDto,
            garden_centres_dtos::GardenCentreDetailDto,
            PagedResponse<garden_centres_dtos::GardenCentreDetailDto>,
            // Locations
            locations_dtos::CreateLocationDto,
            locations_dtos::UpdateLocationDto,
            locations_dtos::LocationResponseDto,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and current principal"),
        (name = "gardencentres", description = "Garden centres of the caller's region"),
        (name = "locations", description = "Locations of the caller's region"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Garden Centres API",
        version = "1.0.0",
        description = "Region-scoped management of garden centres and their locations",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
