use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::garden_centres::models::GardenCentreDetail;
use crate::features::locations::models::{Location, LocationInput};
use crate::shared::region::{BoundRegion, Region};

/// Location persistence bound to a single region.
///
/// Built per request from the caller's region claim. Every read is filtered
/// by the bound region and every call that names a region must name this one.
pub struct LocationRepository {
    pool: SqlitePool,
    region: BoundRegion,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool, region: &str) -> Result<Self> {
        Ok(Self {
            pool,
            region: BoundRegion::new(region)?,
        })
    }

    pub async fn list(&self, region: Region) -> Result<Vec<Location>> {
        self.region.ensure(region)?;

        sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, region
            FROM locations
            WHERE region = ?
            ORDER BY id
            "#,
        )
        .bind(self.region.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list locations: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_by_id(&self, id: i64, region: Region) -> Result<Option<Location>> {
        self.region.ensure(region)?;

        sqlx::query_as::<_, Location>(
            r#"
            SELECT id, name, region
            FROM locations
            WHERE id = ? AND region = ?
            "#,
        )
        .bind(id)
        .bind(self.region.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get location {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    /// Garden centres of this region that reference `location_id`
    pub async fn get_garden_centres_by_location(
        &self,
        location_id: i64,
        region: Region,
    ) -> Result<Vec<GardenCentreDetail>> {
        self.region.ensure(region)?;

        sqlx::query_as::<_, GardenCentreDetail>(
            r#"
            SELECT gc.id, gc.name, gc.location_id, gc.region, l.name AS location_name
            FROM garden_centres gc
            JOIN locations l ON l.id = gc.location_id
            WHERE gc.location_id = ? AND gc.region = ?
            ORDER BY gc.id
            "#,
        )
        .bind(location_id)
        .bind(self.region.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to list garden centres for location {}: {:?}",
                location_id,
                e
            );
            AppError::Database(e)
        })
    }

    pub async fn add(&self, location: &LocationInput) -> Result<Location> {
        self.region.ensure(location.region)?;

        let created = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, region)
            VALUES (?, ?)
            RETURNING id, name, region
            "#,
        )
        .bind(&location.name)
        .bind(self.region.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add location: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(id = created.id, region = %created.region, "Location created");

        Ok(created)
    }

    /// Replace the name of an existing location; never inserts
    pub async fn update(&self, id: i64, location: &LocationInput) -> Result<()> {
        self.region.ensure(location.region)?;

        let result = sqlx::query(
            r#"
            UPDATE locations
            SET name = ?
            WHERE id = ? AND region = ?
            "#,
        )
        .bind(&location.name)
        .bind(id)
        .bind(self.region.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update location {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location {} not found", id)));
        }

        Ok(())
    }

    /// Remove a location that nothing references. Missing ids are a no-op.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM locations WHERE id = ? AND region = ?")
                .bind(id)
                .bind(self.region.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            return Ok(());
        }

        let dependents: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM garden_centres WHERE location_id = ? AND region = ?",
        )
        .bind(id)
        .bind(self.region.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if dependents > 0 {
            return Err(in_use(id));
        }

        sqlx::query("DELETE FROM locations WHERE id = ? AND region = ?")
            .bind(id)
            .bind(self.region.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| handle_delete_error(e, id))?;

        tx.commit().await?;

        tracing::info!(id, region = %self.region.as_str(), "Location deleted");

        Ok(())
    }
}

fn in_use(id: i64) -> AppError {
    AppError::Conflict(format!(
        "Cannot delete Location {} as it has associated GardenCentres.",
        id
    ))
}

/// The store's own RESTRICT constraint backs up the dependents check
fn handle_delete_error(e: sqlx::Error, id: i64) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return in_use(id);
        }
    }
    tracing::error!("Failed to delete location {}: {:?}", id, e);
    AppError::Database(e)
}
