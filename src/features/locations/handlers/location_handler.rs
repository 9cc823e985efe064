use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::core::state::AppState;
use crate::features::auth::guards::RegionClaim;
use crate::features::garden_centres::dtos::GardenCentreDetailDto;
use crate::features::locations::dtos::{
    CreateLocationDto, LocationResponseDto, UpdateLocationDto,
};
use crate::features::locations::models::LocationInput;
use crate::features::locations::repositories::LocationRepository;
use crate::shared::region::Region;
use crate::shared::types::ErrorResponse;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Location {} not found", id))
}

/// List locations in the caller's region
#[utoipa::path(
    get,
    path = "/v1/locations",
    responses(
        (status = 200, description = "Locations of the caller's region", body = Vec<LocationResponseDto>),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn list_locations(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
) -> Result<Json<Vec<LocationResponseDto>>> {
    let repo = LocationRepository::new(state.pool, &region)?;

    let locations = repo.list(region.parse()?).await?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

/// Get a location by id
#[utoipa::path(
    get,
    path = "/v1/locations/{id}",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location found", body = LocationResponseDto),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse),
        (status = 404, description = "Location not found in the caller's region", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_location(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    Path(id): Path<i64>,
) -> Result<Json<LocationResponseDto>> {
    let repo = LocationRepository::new(state.pool, &region)?;

    let location = repo
        .get_by_id(id, region.parse()?)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(location.into()))
}

/// List garden centres at a location
#[utoipa::path(
    get,
    path = "/v1/locations/{id}/gardencentres",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 200, description = "Garden centres referencing the location", body = Vec<GardenCentreDetailDto>),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn list_location_garden_centres(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    Path(id): Path<i64>,
) -> Result<Json<Vec<GardenCentreDetailDto>>> {
    let repo = LocationRepository::new(state.pool, &region)?;

    let centres = repo
        .get_garden_centres_by_location(id, region.parse()?)
        .await?;
    Ok(Json(centres.into_iter().map(Into::into).collect()))
}

/// Create a location in the caller's region
#[utoipa::path(
    post,
    path = "/v1/locations",
    request_body = CreateLocationDto,
    responses(
        (status = 201, description = "Location created", body = LocationResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn create_location(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    AppJson(dto): AppJson<CreateLocationDto>,
) -> Result<impl IntoResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let repo = LocationRepository::new(state.pool, &region)?;

    let created = repo
        .add(&LocationInput {
            name: dto.name,
            region: region.parse()?,
        })
        .await?;

    let location = format!("/v1/locations/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(LocationResponseDto::from(created)),
    ))
}

/// Rename a location
#[utoipa::path(
    put,
    path = "/v1/locations/{id}",
    params(("id" = i64, Path, description = "Location id")),
    request_body = UpdateLocationDto,
    responses(
        (status = 204, description = "Location updated"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse),
        (status = 404, description = "Location not found in the caller's region", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn update_location(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateLocationDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let repo = LocationRepository::new(state.pool, &region)?;
    let region: Region = region.parse()?;

    repo.get_by_id(id, region)
        .await?
        .ok_or_else(|| not_found(id))?;

    repo.update(
        id,
        &LocationInput {
            name: dto.name,
            region,
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a location that no garden centre references
#[utoipa::path(
    delete,
    path = "/v1/locations/{id}",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 400, description = "Location still has garden centres", body = ErrorResponse),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse),
        (status = 404, description = "Location not found in the caller's region", body = ErrorResponse)
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn delete_location(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let repo = LocationRepository::new(state.pool, &region)?;

    repo.get_by_id(id, region.parse()?)
        .await?
        .ok_or_else(|| not_found(id))?;

    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
