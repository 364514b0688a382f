use crate::models::ride::{Ride, RideStatus};
use crate::utils::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Acceso a persistencia de rides
///
/// Las operaciones `*_if_*` son escrituras condicionales: actualizan el
/// registro solo si el status esperado sigue vigente en el momento de la
/// escritura y devuelven `None` cuando el guard falla. La corrección ante
/// callers concurrentes depende de ese guard, no de locks en memoria.
#[async_trait]
pub trait RideRepository: Send + Sync {
    async fn create(&self, ride: Ride) -> AppResult<Ride>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>>;
    async fn find_by_rider(&self, rider_id: Uuid) -> AppResult<Vec<Ride>>;
    async fn find_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>>;
    async fn find_by_status(&self, status: RideStatus) -> AppResult<Vec<Ride>>;
    /// Rides pendientes, el más antiguo primero
    async fn find_pending(&self) -> AppResult<Vec<Ride>>;
    async fn find_ongoing_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>>;
    /// Los N rides creados más recientemente
    async fn find_recent(&self, limit: i64) -> AppResult<Vec<Ride>>;

    /// pending → accepted, asignando el captain; exactamente un ganador
    async fn accept_if_pending(&self, id: Uuid, captain_id: Uuid) -> AppResult<Option<Ride>>;
    /// accepted → ongoing
    async fn start_if_accepted(&self, id: Uuid) -> AppResult<Option<Ride>>;
    /// ongoing → completed, registrando duración y distancia
    async fn complete_if_ongoing(
        &self,
        id: Uuid,
        duration_seconds: i64,
        distance_meters: f64,
    ) -> AppResult<Option<Ride>>;
    /// pending|accepted|ongoing → cancelled; captain/fare/otp quedan intactos
    async fn cancel_if_active(&self, id: Uuid) -> AppResult<Option<Ride>>;
}

pub struct PgRideRepository {
    pool: PgPool,
}

impl PgRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn create(&self, ride: Ride) -> AppResult<Ride> {
        let created = sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (id, rider_id, captain_id, pickup, destination, vehicle_type, fare, otp, status, duration_seconds, distance_meters, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(ride.id)
        .bind(ride.rider_id)
        .bind(ride.captain_id)
        .bind(&ride.pickup)
        .bind(&ride.destination)
        .bind(ride.vehicle_type)
        .bind(ride.fare)
        .bind(&ride.otp)
        .bind(ride.status)
        .bind(ride.duration_seconds)
        .bind(ride.distance_meters)
        .bind(ride.created_at)
        .bind(ride.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error creating ride: {}", e)))?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::UpstreamProvider(format!("Error finding ride: {}", e)))?;

        Ok(ride)
    }

    async fn find_by_rider(&self, rider_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides WHERE rider_id = $1 ORDER BY created_at DESC",
        )
        .bind(rider_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error listing rides by rider: {}", e)))?;

        Ok(rides)
    }

    async fn find_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides WHERE captain_id = $1 ORDER BY created_at DESC",
        )
        .bind(captain_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::UpstreamProvider(format!("Error listing rides by captain: {}", e))
        })?;

        Ok(rides)
    }

    async fn find_by_status(&self, status: RideStatus) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::UpstreamProvider(format!("Error listing rides by status: {}", e))
        })?;

        Ok(rides)
    }

    async fn find_pending(&self) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides WHERE status = 'pending' ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error listing pending rides: {}", e)))?;

        Ok(rides)
    }

    async fn find_ongoing_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides WHERE captain_id = $1 AND status = 'ongoing' ORDER BY created_at DESC",
        )
        .bind(captain_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::UpstreamProvider(format!("Error listing ongoing rides: {}", e))
        })?;

        Ok(rides)
    }

    async fn find_recent(&self, limit: i64) -> AppResult<Vec<Ride>> {
        let rides = sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error listing recent rides: {}", e)))?;

        Ok(rides)
    }

    async fn accept_if_pending(&self, id: Uuid, captain_id: Uuid) -> AppResult<Option<Ride>> {
        // El WHERE sobre status hace la escritura condicional: si dos
        // captains compiten, solo uno observa 'pending' en el momento
        // del UPDATE; el otro recibe cero filas.
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET captain_id = $2, status = 'accepted', updated_at = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(captain_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error accepting ride: {}", e)))?;

        Ok(ride)
    }

    async fn start_if_accepted(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET status = 'ongoing', updated_at = $2
            WHERE id = $1 AND status = 'accepted'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error starting ride: {}", e)))?;

        Ok(ride)
    }

    async fn complete_if_ongoing(
        &self,
        id: Uuid,
        duration_seconds: i64,
        distance_meters: f64,
    ) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET status = 'completed', duration_seconds = $2, distance_meters = $3, updated_at = $4
            WHERE id = $1 AND status = 'ongoing'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(duration_seconds)
        .bind(distance_meters)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error completing ride: {}", e)))?;

        Ok(ride)
    }

    async fn cancel_if_active(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET status = 'cancelled', updated_at = $2
            WHERE id = $1 AND status IN ('pending', 'accepted', 'ongoing')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error cancelling ride: {}", e)))?;

        Ok(ride)
    }
}
