use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::core::state::AppState;
use crate::features::auth::guards::RegionClaim;
use crate::features::garden_centres::dtos::{
    CreateGardenCentreDto, GardenCentreDetailDto, GardenCentreResponseDto, UpdateGardenCentreDto,
};
use crate::features::garden_centres::models::{CreateGardenCentre, GardenCentre};
use crate::features::garden_centres::repositories::GardenCentreRepository;
use crate::shared::region::Region;
use crate::shared::types::{ErrorResponse, PagedResponse, PaginationQuery};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("GardenCentre {} not found", id))
}

/// List garden centres in the caller's region, one page at a time
#[utoipa::path(
    get,
    path = "/v1/gardencentres",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of garden centres", body = PagedResponse<GardenCentreDetailDto>),
        (status = 400, description = "Invalid page", body = ErrorResponse),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse)
    ),
    tag = "gardencentres",
    security(("bearer_auth" = []))
)]
pub async fn list_garden_centres(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<Json<PagedResponse<GardenCentreDetailDto>>> {
    let page = query.page();
    if page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0.".to_string(),
        ));
    }
    let page_size = query.page_size_or(state.pagination.default_page_size);

    let repo = GardenCentreRepository::new(state.pool, &region)?;

    let (items, total) = repo.list(page, page_size, region.parse()?).await?;
    let data = items.into_iter().map(Into::into).collect();

    Ok(Json(PagedResponse::new(data, total, page, page_size)))
}

/// Get a garden centre by id, with its location name
#[utoipa::path(
    get,
    path = "/v1/gardencentres/{id}",
    params(("id" = i64, Path, description = "Garden centre id")),
    responses(
        (status = 200, description = "Garden centre found", body = GardenCentreDetailDto),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse),
        (status = 404, description = "Garden centre not found in the caller's region", body = ErrorResponse)
    ),
    tag = "gardencentres",
    security(("bearer_auth" = []))
)]
pub async fn get_garden_centre(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    Path(id): Path<i64>,
) -> Result<Json<GardenCentreDetailDto>> {
    let repo = GardenCentreRepository::new(state.pool, &region)?;

    let centre = repo
        .get_by_id_with_location(id, region.parse()?)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(centre.into()))
}

/// Create a garden centre in the caller's region
#[utoipa::path(
    post,
    path = "/v1/gardencentres",
    request_body = CreateGardenCentreDto,
    responses(
        (status = 201, description = "Garden centre created", body = GardenCentreResponseDto),
        (status = 400, description = "Validation error or unknown location", body = ErrorResponse),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse)
    ),
    tag = "gardencentres",
    security(("bearer_auth" = []))
)]
pub async fn create_garden_centre(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    AppJson(dto): AppJson<CreateGardenCentreDto>,
) -> Result<impl IntoResponse> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let repo = GardenCentreRepository::new(state.pool, &region)?;

    let created = repo
        .add(&CreateGardenCentre {
            name: dto.name,
            location_id: dto.location_id,
            region: region.parse()?,
        })
        .await?;

    let location = format!("/v1/gardencentres/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(GardenCentreResponseDto::from(created)),
    ))
}

/// Replace a garden centre
#[utoipa::path(
    put,
    path = "/v1/gardencentres/{id}",
    params(("id" = i64, Path, description = "Garden centre id")),
    request_body = UpdateGardenCentreDto,
    responses(
        (status = 204, description = "Garden centre updated"),
        (status = 400, description = "Validation error, id mismatch or unknown location", body = ErrorResponse),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse),
        (status = 404, description = "Garden centre not found in the caller's region", body = ErrorResponse)
    ),
    tag = "gardencentres",
    security(("bearer_auth" = []))
)]
pub async fn update_garden_centre(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateGardenCentreDto>,
) -> Result<StatusCode> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if dto.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::BadRequest(
            "Id in body does not match id in path.".to_string(),
        ));
    }

    let repo = GardenCentreRepository::new(state.pool, &region)?;
    let region: Region = region.parse()?;

    repo.get_by_id(id, region)
        .await?
        .ok_or_else(|| not_found(id))?;

    repo.update(&GardenCentre {
        id,
        name: dto.name,
        location_id: dto.location_id,
        region,
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a garden centre
#[utoipa::path(
    delete,
    path = "/v1/gardencentres/{id}",
    params(("id" = i64, Path, description = "Garden centre id")),
    responses(
        (status = 204, description = "Garden centre deleted"),
        (status = 401, description = "Missing token or region claim", body = ErrorResponse),
        (status = 404, description = "Garden centre not found in the caller's region", body = ErrorResponse)
    ),
    tag = "gardencentres",
    security(("bearer_auth" = []))
)]
pub async fn delete_garden_centre(
    State(state): State<AppState>,
    RegionClaim(region): RegionClaim,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let repo = GardenCentreRepository::new(state.pool, &region)?;

    repo.get_by_id(id, region.parse()?)
        .await?
        .ok_or_else(|| not_found(id))?;

    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
