use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::garden_centres::models::{GardenCentre, GardenCentreDetail};
use crate::shared::region::Region;

/// Request DTO for creating a garden centre
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGardenCentreDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub location_id: i64,
}

/// Request DTO for replacing a garden centre.
///
/// `id` is optional; when present it must equal the id in the path.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGardenCentreDto {
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub location_id: i64,
}

/// Response DTO for garden centre
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenCentreResponseDto {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub region: Region,
}

impl From<GardenCentre> for GardenCentreResponseDto {
    fn from(gc: GardenCentre) -> Self {
        Self {
            id: gc.id,
            name: gc.name,
            location_id: gc.location_id,
            region: gc.region,
        }
    }
}

/// Response DTO for garden centre with its location name resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenCentreDetailDto {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub location_name: String,
    pub region: Region,
}

impl From<GardenCentreDetail> for GardenCentreDetailDto {
    fn from(gc: GardenCentreDetail) -> Self {
        Self {
            id: gc.id,
            name: gc.name,
            location_id: gc.location_id,
            location_name: gc.location_name,
            region: gc.region,
        }
    }
}
