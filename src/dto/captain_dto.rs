//! DTOs de captains

use crate::models::captain::{Captain, CaptainStatus, VehicleInfo};
use crate::models::ride::VehicleType;
use crate::services::captain_service::NearbyCaptain;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request para registrar un captain nuevo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCaptainRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate]
    pub vehicle: VehicleRequest,
}

/// Sub-registro de vehículo dentro del registro de captain
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(length(min = 2, max = 50))]
    pub color: String,

    #[validate(length(min = 3, max = 20))]
    pub plate: String,

    #[validate(range(min = 1, max = 12))]
    pub capacity: i32,

    pub vehicle_type: VehicleType,
}

/// Request del captain para reportar su posición actual
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Request del captain para cambiar su disponibilidad
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCaptainStatusRequest {
    pub status: CaptainStatus,
}

/// Request de búsqueda de captains cercanos a un punto de pickup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CaptainSearchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Radio en metros; por defecto 5000
    #[validate(range(min = 1.0))]
    pub radius_meters: Option<f64>,
}

/// Response de captain para la API
#[derive(Debug, Serialize)]
pub struct CaptainResponse {
    pub id: String,
    pub name: String,
    pub vehicle: VehicleInfo,
    pub status: CaptainStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: String,
}

impl From<Captain> for CaptainResponse {
    fn from(captain: Captain) -> Self {
        Self {
            id: captain.id.to_string(),
            name: captain.name,
            vehicle: captain.vehicle,
            status: captain.status,
            latitude: captain.location.map(|l| l.latitude),
            longitude: captain.location.map(|l| l.longitude),
            created_at: captain.created_at.to_rfc3339(),
        }
    }
}

/// Un captain dentro del resultado de búsqueda por proximidad
#[derive(Debug, Serialize)]
pub struct NearbyCaptainResponse {
    pub captain: CaptainResponse,
    pub distance_meters: f64,
}

impl From<NearbyCaptain> for NearbyCaptainResponse {
    fn from(nearby: NearbyCaptain) -> Self {
        Self {
            captain: nearby.captain.into(),
            distance_meters: nearby.distance_meters,
        }
    }
}
