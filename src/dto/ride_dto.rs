//! DTOs de rides
//!
//! Formas de request/response agnósticas al transporte que el núcleo
//! consume o expone. La capa de presentación externa decide cómo
//! serializarlas hacia el usuario.

use crate::models::ride::{Ride, RideStatus, VehicleType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para crear un nuevo ride
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRideRequest {
    pub rider_id: Uuid,

    #[validate(length(min = 1, max = 500))]
    pub pickup: String,

    #[validate(length(min = 1, max = 500))]
    pub destination: String,

    pub vehicle_type: VehicleType,
}

/// Request de un captain para aceptar un ride pendiente
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfirmRideRequest {
    pub ride_id: Uuid,
    pub captain_id: Uuid,
}

/// Request para iniciar un ride aceptado, presentando el OTP del rider
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartRideRequest {
    pub ride_id: Uuid,

    #[validate(length(equal = 6))]
    pub otp: String,
}

/// Request para cerrar un ride en curso
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteRideRequest {
    pub ride_id: Uuid,
    pub captain_id: Uuid,

    #[validate(range(min = 1))]
    pub duration_seconds: i64,

    #[validate(range(min = 1.0))]
    pub distance_meters: f64,
}

/// Response de ride para la API
#[derive(Debug, Serialize)]
pub struct RideResponse {
    pub id: String,
    pub rider_id: String,
    pub captain_id: Option<String>,
    pub pickup: String,
    pub destination: String,
    pub vehicle_type: VehicleType,
    pub fare: i64,
    /// Incluido en la respuesta; quién puede verlo lo decide el caller
    pub otp: String,
    pub status: RideStatus,
    pub duration_seconds: Option<i64>,
    pub distance_meters: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        Self {
            id: ride.id.to_string(),
            rider_id: ride.rider_id.to_string(),
            captain_id: ride.captain_id.map(|id| id.to_string()),
            pickup: ride.pickup,
            destination: ride.destination,
            vehicle_type: ride.vehicle_type,
            fare: ride.fare,
            otp: ride.otp,
            status: ride.status,
            duration_seconds: ride.duration_seconds,
            distance_meters: ride.distance_meters,
            created_at: ride.created_at.to_rfc3339(),
            updated_at: ride.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ride_request_rejects_empty_pickup() {
        let req = CreateRideRequest {
            rider_id: Uuid::new_v4(),
            pickup: "".to_string(),
            destination: "Central Station".to_string(),
            vehicle_type: VehicleType::Auto,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_start_ride_request_requires_six_digit_otp() {
        let req = StartRideRequest {
            ride_id: Uuid::new_v4(),
            otp: "1234".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_ride_response_serializes_lowercase_enums() {
        let ride = Ride::new(
            Uuid::new_v4(),
            "Sector 12".to_string(),
            "Estación Central".to_string(),
            VehicleType::Moto,
            75,
            "482913".to_string(),
        );
        let response = RideResponse::from(ride.clone());
        assert_eq!(response.id, ride.id.to_string());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["vehicle_type"], "moto");
        assert_eq!(json["fare"], 75);
    }

    #[test]
    fn test_complete_ride_request_rejects_non_positive_values() {
        let req = CompleteRideRequest {
            ride_id: Uuid::new_v4(),
            captain_id: Uuid::new_v4(),
            duration_seconds: 0,
            distance_meters: 1200.0,
        };
        assert!(req.validate().is_err());
    }
}
