use crate::models::captain::{Captain, CaptainStatus, Location, VehicleInfo};
use crate::models::ride::VehicleType;
use crate::utils::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Acceso a persistencia de captains
#[async_trait]
pub trait CaptainRepository: Send + Sync {
    async fn create(&self, captain: Captain) -> AppResult<Captain>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Captain>>;
    /// Toda la flota con disponibilidad active; el filtrado por radio es del caller
    async fn find_active(&self) -> AppResult<Vec<Captain>>;
    async fn update_status(&self, id: Uuid, status: CaptainStatus) -> AppResult<Option<Captain>>;
    async fn update_location(&self, id: Uuid, location: Location) -> AppResult<Option<Captain>>;
}

// Fila plana de la tabla captains; el modelo anida vehicle/location
#[derive(Debug, sqlx::FromRow)]
struct CaptainRow {
    id: Uuid,
    name: String,
    vehicle_color: String,
    vehicle_plate: String,
    vehicle_capacity: i32,
    vehicle_type: VehicleType,
    status: CaptainStatus,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CaptainRow> for Captain {
    fn from(row: CaptainRow) -> Self {
        let location = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Captain {
            id: row.id,
            name: row.name,
            vehicle: VehicleInfo {
                color: row.vehicle_color,
                plate: row.vehicle_plate,
                capacity: row.vehicle_capacity,
                vehicle_type: row.vehicle_type,
            },
            status: row.status,
            location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgCaptainRepository {
    pool: PgPool,
}

impl PgCaptainRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaptainRepository for PgCaptainRepository {
    async fn create(&self, captain: Captain) -> AppResult<Captain> {
        let row = sqlx::query_as::<_, CaptainRow>(
            r#"
            INSERT INTO captains (id, name, vehicle_color, vehicle_plate, vehicle_capacity, vehicle_type, status, latitude, longitude, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(captain.id)
        .bind(&captain.name)
        .bind(&captain.vehicle.color)
        .bind(&captain.vehicle.plate)
        .bind(captain.vehicle.capacity)
        .bind(captain.vehicle.vehicle_type)
        .bind(captain.status)
        .bind(captain.location.map(|l| l.latitude))
        .bind(captain.location.map(|l| l.longitude))
        .bind(captain.created_at)
        .bind(captain.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error creating captain: {}", e)))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Captain>> {
        let row = sqlx::query_as::<_, CaptainRow>("SELECT * FROM captains WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::UpstreamProvider(format!("Error finding captain: {}", e)))?;

        Ok(row.map(Captain::from))
    }

    async fn find_active(&self) -> AppResult<Vec<Captain>> {
        let rows = sqlx::query_as::<_, CaptainRow>(
            "SELECT * FROM captains WHERE status = 'active'",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::UpstreamProvider(format!("Error listing active captains: {}", e))
        })?;

        Ok(rows.into_iter().map(Captain::from).collect())
    }

    async fn update_status(&self, id: Uuid, status: CaptainStatus) -> AppResult<Option<Captain>> {
        let row = sqlx::query_as::<_, CaptainRow>(
            r#"
            UPDATE captains
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::UpstreamProvider(format!("Error updating captain status: {}", e))
        })?;

        Ok(row.map(Captain::from))
    }

    async fn update_location(&self, id: Uuid, location: Location) -> AppResult<Option<Captain>> {
        let row = sqlx::query_as::<_, CaptainRow>(
            r#"
            UPDATE captains
            SET latitude = $2, longitude = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::UpstreamProvider(format!("Error updating captain location: {}", e))
        })?;

        Ok(row.map(Captain::from))
    }
}
