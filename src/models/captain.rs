//! Modelo de Captain
//!
//! Este módulo contiene el aggregate Captain con sus sub-registros
//! tipados. Los sub-registros se construyen con validación explícita
//! en lugar de composición clave-valor libre.

use crate::models::ride::VehicleType;
use crate::utils::errors::{input_error, AppError, AppResult};
use crate::utils::validation::{validate_coordinates, validate_not_empty, validate_positive};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

/// Disponibilidad del captain - mapea al ENUM captain_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "captain_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CaptainStatus {
    Active,
    Inactive,
}

/// Descriptor del vehículo del captain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleInfo {
    pub color: String,
    pub plate: String,
    pub capacity: i32,
    pub vehicle_type: VehicleType,
}

impl VehicleInfo {
    pub fn new(
        color: String,
        plate: String,
        capacity: i32,
        vehicle_type: VehicleType,
    ) -> AppResult<Self> {
        validate_not_empty(&color)
            .map_err(|_| input_error("Vehicle color is required"))?;
        validate_not_empty(&plate)
            .map_err(|_| input_error("Vehicle plate is required"))?;
        validate_positive(capacity)
            .map_err(|_| input_error("Vehicle capacity must be at least 1"))?;

        Ok(Self {
            color,
            plate,
            capacity,
            vehicle_type,
        })
    }
}

/// Posición GPS reportada por el captain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        validate_coordinates(latitude, longitude).map_err(|e| {
            AppError::InvalidInput(format!("Invalid coordinates: {}", e.code))
        })?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Captain principal - mapea a la tabla captains
///
/// Lo muta únicamente el propio captain vía sus updates de estado y
/// posición; la lógica de rides solo lo referencia desde `Ride.captain_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Captain {
    pub id: Uuid,
    pub name: String,
    pub vehicle: VehicleInfo,
    pub status: CaptainStatus,
    /// Ausente hasta el primer reporte de posición
    pub location: Option<Location>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Captain {
    /// Construir un captain nuevo; arranca inactive y sin posición
    pub fn new(name: String, vehicle: VehicleInfo) -> AppResult<Self> {
        validate_not_empty(&name).map_err(|_| input_error("Captain name is required"))?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            vehicle,
            status: CaptainStatus::Inactive,
            location: None,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> VehicleInfo {
        VehicleInfo::new("negro".to_string(), "AB-123-CD".to_string(), 4, VehicleType::Car)
            .unwrap()
    }

    #[test]
    fn test_new_captain_starts_inactive_without_location() {
        let captain = Captain::new("Elena".to_string(), vehicle()).unwrap();
        assert_eq!(captain.status, CaptainStatus::Inactive);
        assert!(captain.location.is_none());
    }

    #[test]
    fn test_vehicle_info_rejects_bad_fields() {
        assert!(VehicleInfo::new("".into(), "AB-123".into(), 4, VehicleType::Car).is_err());
        assert!(VehicleInfo::new("rojo".into(), "".into(), 4, VehicleType::Auto).is_err());
        assert!(VehicleInfo::new("rojo".into(), "AB-123".into(), 0, VehicleType::Moto).is_err());
    }

    #[test]
    fn test_location_rejects_out_of_range() {
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(0.0, -181.0).is_err());
        assert!(Location::new(48.85, 2.35).is_ok());
    }

    #[test]
    fn test_captain_requires_name() {
        assert!(Captain::new("  ".to_string(), vehicle()).is_err());
    }
}
