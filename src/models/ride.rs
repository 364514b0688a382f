//! Modelo de Ride
//!
//! Este módulo contiene el aggregate Ride y sus enums de estado.
//! El fare y el OTP son inmutables después de la creación; el captain
//! se asigna exactamente una vez durante la transición pending→accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del ride - mapea al ENUM ride_status
///
/// Transiciones permitidas: pending → accepted → ongoing → completed;
/// cancelled es alcanzable desde pending, accepted u ongoing, nunca
/// desde completed. Ninguna transición revisita un estado anterior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ride_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Pending,
    Accepted,
    Ongoing,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Pending => "pending",
            RideStatus::Accepted => "accepted",
            RideStatus::Ongoing => "ongoing",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }

    /// Estados desde los que todavía se permite cancelar
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            RideStatus::Pending | RideStatus::Accepted | RideStatus::Ongoing
        )
    }
}

/// Tipo de vehículo solicitado - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Auto,
    Car,
    Moto,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Auto => "auto",
            VehicleType::Car => "car",
            VehicleType::Moto => "moto",
        }
    }
}

/// Ride principal - mapea exactamente a la tabla rides
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ride {
    pub id: Uuid,
    pub rider_id: Uuid,
    pub captain_id: Option<Uuid>,
    pub pickup: String,
    pub destination: String,
    pub vehicle_type: VehicleType,
    /// Unidades enteras de moneda, fijado una sola vez en la creación
    pub fare: i64,
    /// Código de un solo uso de longitud fija, fijado en la creación
    pub otp: String,
    pub status: RideStatus,
    pub duration_seconds: Option<i64>,
    pub distance_meters: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Construir un ride nuevo en estado pending
    pub fn new(
        rider_id: Uuid,
        pickup: String,
        destination: String,
        vehicle_type: VehicleType,
        fare: i64,
        otp: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            rider_id,
            captain_id: None,
            pickup,
            destination,
            vehicle_type,
            fare,
            otp,
            status: RideStatus::Pending,
            duration_seconds: None,
            distance_meters: None,
            created_at: now,
            updated_at: now,
        }
    }
}
