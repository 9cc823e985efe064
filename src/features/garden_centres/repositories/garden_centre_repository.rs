use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::garden_centres::models::{
    CreateGardenCentre, GardenCentre, GardenCentreDetail,
};
use crate::shared::region::{BoundRegion, Region};

const DETAIL_SELECT: &str = r#"
    SELECT gc.id, gc.name, gc.location_id, gc.region, l.name AS location_name
    FROM garden_centres gc
    JOIN locations l ON l.id = gc.location_id
"#;

/// Garden centre persistence bound to a single region.
///
/// Writes must carry the bound region and may only point at a location that
/// exists in that same region.
pub struct GardenCentreRepository {
    pool: SqlitePool,
    region: BoundRegion,
}

impl GardenCentreRepository {
    pub fn new(pool: SqlitePool, region: &str) -> Result<Self> {
        Ok(Self {
            pool,
            region: BoundRegion::new(region)?,
        })
    }

    /// One page of garden centres ordered by id, plus the total count
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        region: Region,
    ) -> Result<(Vec<GardenCentreDetail>, i64)> {
        if page < 1 {
            return Err(AppError::Validation(
                "Page must be greater than or equal to 1.".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(AppError::Validation(
                "PageSize must be greater than or equal to 1.".to_string(),
            ));
        }
        self.region.ensure(region)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM garden_centres WHERE region = ?")
            .bind(self.region.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count garden centres: {:?}", e);
                AppError::Database(e)
            })?;

        // A page whose offset overflows i64 lies past any stored row
        let Some(offset) = (page - 1).checked_mul(page_size) else {
            return Ok((Vec::new(), total));
        };

        let sql = format!(
            "{} WHERE gc.region = ? ORDER BY gc.id LIMIT ? OFFSET ?",
            DETAIL_SELECT
        );
        let items = sqlx::query_as::<_, GardenCentreDetail>(&sql)
            .bind(self.region.as_str())
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list garden centres: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((items, total))
    }

    pub async fn get_by_id(&self, id: i64, region: Region) -> Result<Option<GardenCentre>> {
        self.region.ensure(region)?;

        sqlx::query_as::<_, GardenCentre>(
            r#"
            SELECT id, name, location_id, region
            FROM garden_centres
            WHERE id = ? AND region = ?
            "#,
        )
        .bind(id)
        .bind(self.region.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get garden centre {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    pub async fn get_by_id_with_location(
        &self,
        id: i64,
        region: Region,
    ) -> Result<Option<GardenCentreDetail>> {
        self.region.ensure(region)?;

        let sql = format!("{} WHERE gc.id = ? AND gc.region = ?", DETAIL_SELECT);
        sqlx::query_as::<_, GardenCentreDetail>(&sql)
            .bind(id)
            .bind(self.region.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get garden centre {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    pub async fn add(&self, garden_centre: &CreateGardenCentre) -> Result<GardenCentre> {
        self.region.ensure(garden_centre.region)?;
        self.ensure_location(garden_centre.location_id).await?;

        let created = sqlx::query_as::<_, GardenCentre>(
            r#"
            INSERT INTO garden_centres (name, location_id, region)
            VALUES (?, ?, ?)
            RETURNING id, name, location_id, region
            "#,
        )
        .bind(&garden_centre.name)
        .bind(garden_centre.location_id)
        .bind(self.region.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add garden centre: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            id = created.id,
            location_id = created.location_id,
            region = %created.region,
            "Garden centre created"
        );

        Ok(created)
    }

    /// Overwrite every column of an existing garden centre
    pub async fn update(&self, garden_centre: &GardenCentre) -> Result<()> {
        self.region.ensure(garden_centre.region)?;
        self.ensure_location(garden_centre.location_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE garden_centres
            SET name = ?, location_id = ?
            WHERE id = ? AND region = ?
            "#,
        )
        .bind(&garden_centre.name)
        .bind(garden_centre.location_id)
        .bind(garden_centre.id)
        .bind(self.region.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update garden centre {}: {:?}", garden_centre.id, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "GardenCentre {} not found",
                garden_centre.id
            )));
        }

        Ok(())
    }

    /// Missing ids are a no-op
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM garden_centres WHERE id = ? AND region = ?")
            .bind(id)
            .bind(self.region.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete garden centre {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() > 0 {
            tracing::info!(id, region = %self.region.as_str(), "Garden centre deleted");
        }

        Ok(())
    }

    async fn ensure_location(&self, location_id: i64) -> Result<()> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM locations WHERE id = ? AND region = ?")
                .bind(location_id)
                .bind(self.region.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to look up location {}: {:?}", location_id, e);
                    AppError::Database(e)
                })?;

        if found.is_none() {
            return Err(AppError::Validation(format!(
                "Location {} does not exist in region {}.",
                location_id,
                self.region.as_str()
            )));
        }

        Ok(())
    }
}
