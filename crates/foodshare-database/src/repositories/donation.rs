//! Donation repository backed by PostgreSQL/PostGIS.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use foodshare_core::error::{AppError, ErrorKind};
use foodshare_core::geo::{GeoPoint, ProximityQuery};
use foodshare_core::result::AppResult;
use foodshare_entity::donation::{Donation, DonationCategory, DonationFilter};

use crate::store::{DonationMutation, DonationStore, categories_or_all};

/// Column list shared by every donation query. The geography column is
/// split back into latitude/longitude.
const DONATION_COLUMNS: &str = "id, donor_id, reserved_by, title, description, category, \
     quantity, is_for_animals, is_reserved, is_collected, \
     ST_Y(location::geometry) AS latitude, ST_X(location::geometry) AS longitude, \
     created_at, updated_at";

/// Raw `donations` row.
#[derive(Debug, FromRow)]
struct DonationRow {
    id: Uuid,
    donor_id: Uuid,
    reserved_by: Option<Uuid>,
    title: String,
    description: Option<String>,
    category: String,
    quantity: Option<String>,
    is_for_animals: bool,
    is_reserved: bool,
    is_collected: bool,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DonationRow> for Donation {
    type Error = AppError;

    fn try_from(row: DonationRow) -> Result<Self, Self::Error> {
        let category: DonationCategory = row.category.parse().map_err(|_| {
            AppError::database(format!(
                "Donation {} has unknown category '{}'",
                row.id, row.category
            ))
        })?;
        let location = GeoPoint::new(row.latitude, row.longitude).map_err(|_| {
            AppError::database(format!("Donation {} has an invalid location", row.id))
        })?;

        Ok(Donation {
            id: row.id,
            donor_id: row.donor_id,
            reserved_by: row.reserved_by,
            title: row.title,
            description: row.description,
            category,
            quantity: row.quantity,
            is_for_animals: row.is_for_animals,
            is_reserved: row.is_reserved,
            is_collected: row.is_collected,
            location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_donations(rows: Vec<DonationRow>) -> AppResult<Vec<Donation>> {
    rows.into_iter().map(Donation::try_from).collect()
}

/// Repository for donation CRUD, spatial search and locked updates.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    /// Create a new donation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationStore for DonationRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, donation: &Donation) -> AppResult<Donation> {
        donation.check_invariants()?;

        let row = sqlx::query_as::<_, DonationRow>(&format!(
            "INSERT INTO donations (id, donor_id, reserved_by, title, description, category, \
             quantity, is_for_animals, is_reserved, is_collected, location, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
             ST_SetSRID(ST_MakePoint($11, $12), 4326)::geography, $13, $14) \
             RETURNING {DONATION_COLUMNS}"
        ))
        .bind(donation.id)
        .bind(donation.donor_id)
        .bind(donation.reserved_by)
        .bind(&donation.title)
        .bind(&donation.description)
        .bind(donation.category.as_str())
        .bind(&donation.quantity)
        .bind(donation.is_for_animals)
        .bind(donation.is_reserved)
        .bind(donation.is_collected)
        .bind(donation.location.longitude())
        .bind(donation.location.latitude())
        .bind(donation.created_at)
        .bind(donation.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create donation", e))?;

        row.try_into()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Donation> {
        sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find donation", e))?
        .ok_or_else(|| AppError::not_found(format!("Donation {id} not found")))?
        .try_into()
    }

    async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Donation>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE id = ANY($1) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load donations", e))?;

        into_donations(rows)
    }

    async fn update_with(&self, id: Uuid, mutation: DonationMutation) -> AppResult<Donation> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut updated: Donation = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock donation", e))?
        .ok_or_else(|| AppError::not_found(format!("Donation {id} not found")))?
        .try_into()?;

        // An error here drops `tx`, which rolls the transaction back.
        mutation(&mut updated)?;
        updated.touch();
        updated.check_invariants()?;

        let row = sqlx::query_as::<_, DonationRow>(&format!(
            "UPDATE donations SET reserved_by = $2, title = $3, description = $4, category = $5, \
             quantity = $6, is_for_animals = $7, is_reserved = $8, is_collected = $9, \
             updated_at = $10 \
             WHERE id = $1 RETURNING {DONATION_COLUMNS}"
        ))
        .bind(id)
        .bind(updated.reserved_by)
        .bind(&updated.title)
        .bind(&updated.description)
        .bind(updated.category.as_str())
        .bind(&updated.quantity)
        .bind(updated.is_for_animals)
        .bind(updated.is_reserved)
        .bind(updated.is_collected)
        .bind(updated.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update donation", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit donation update", e)
        })?;

        debug!(donation_id = %id, "Donation updated");
        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM donations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete donation", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Donation {id} not found")));
        }
        Ok(())
    }

    async fn list(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>> {
        let rows = sqlx::query_as::<_, DonationRow>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations \
             WHERE ($1::text IS NULL OR category = $1) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(filter.category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list donations", e))?;

        into_donations(rows)
    }

    async fn find_nearby(
        &self,
        query: &ProximityQuery,
        category: Option<DonationCategory>,
    ) -> AppResult<Vec<Uuid>> {
        // use_spheroid = false: great-circle distance on the mean-radius sphere.
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM donations \
             WHERE ST_DWithin(location, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3, false) \
             AND ($4::text IS NULL OR category = $4) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(query.center.longitude())
        .bind(query.center.latitude())
        .bind(query.radius.meters())
        .bind(category.map(|c| c.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to search nearby donations", e)
        })
    }

    async fn list_distinct_categories(&self) -> AppResult<Vec<DonationCategory>> {
        let labels: Vec<String> = sqlx::query_scalar("SELECT DISTINCT category FROM donations")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list categories", e)
            })?;

        let categories = labels
            .iter()
            .filter_map(|label| label.parse::<DonationCategory>().ok())
            .collect();
        Ok(categories_or_all(categories))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
