//! Helpers compartidos por los tests de integración
//!
//! Arman un `AppState` sobre los repositorios en memoria y un proveedor
//! de routing fijo (5 km, 10 min), sin tocar red ni base de datos.

use async_trait::async_trait;
use ride_dispatch::config::environment::EnvironmentConfig;
use ride_dispatch::dto::captain_dto::{CreateCaptainRequest, VehicleRequest};
use ride_dispatch::dto::ride_dto::CreateRideRequest;
use ride_dispatch::models::captain::{Captain, CaptainStatus};
use ride_dispatch::models::ride::VehicleType;
use ride_dispatch::repositories::{
    InMemoryCaptainRepository, InMemoryRevokedTokenRepository, InMemoryRideRepository,
};
use ride_dispatch::services::routing_service::{RouteEstimate, RoutingProvider};
use ride_dispatch::state::AppState;
use ride_dispatch::utils::errors::AppResult;
use std::sync::Arc;
use uuid::Uuid;

pub struct FixedRoutingProvider {
    pub estimate: RouteEstimate,
}

#[async_trait]
impl RoutingProvider for FixedRoutingProvider {
    async fn resolve(&self, _pickup: &str, _destination: &str) -> AppResult<RouteEstimate> {
        Ok(self.estimate)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Estado completo sobre repositorios en memoria; el routing devuelve
/// siempre distancia 5000 m y duración 600 s (car → fare 155)
pub fn test_state() -> AppState {
    init_tracing();

    let config = EnvironmentConfig {
        environment: "test".to_string(),
        database_url: "postgresql://localhost/unused".to_string(),
        mapbox_token: None,
        search_radius_meters: 5_000.0,
    };

    AppState::with_repositories(
        config,
        Arc::new(InMemoryRideRepository::new()),
        Arc::new(InMemoryCaptainRepository::new()),
        Arc::new(InMemoryRevokedTokenRepository::new()),
        Arc::new(FixedRoutingProvider {
            estimate: RouteEstimate {
                distance_meters: 5_000.0,
                duration_seconds: 600.0,
            },
        }),
    )
}

#[allow(dead_code)]
pub fn ride_request(rider_id: Uuid, vehicle_type: VehicleType) -> CreateRideRequest {
    CreateRideRequest {
        rider_id,
        pickup: "Sector 12, Calle Mayor 4".to_string(),
        destination: "Estación Central".to_string(),
        vehicle_type,
    }
}

#[allow(dead_code)]
pub fn captain_request(name: &str) -> CreateCaptainRequest {
    CreateCaptainRequest {
        name: name.to_string(),
        vehicle: VehicleRequest {
            color: "negro".to_string(),
            plate: "AB-123-CD".to_string(),
            capacity: 4,
            vehicle_type: VehicleType::Car,
        },
    }
}

/// Captain activo y posicionado, listo para aceptar rides
#[allow(dead_code)]
pub async fn active_captain_at(
    state: &AppState,
    name: &str,
    latitude: f64,
    longitude: f64,
) -> Captain {
    let captain = state
        .captains
        .create_captain(captain_request(name))
        .await
        .unwrap();
    state
        .captains
        .update_status(captain.id, CaptainStatus::Active)
        .await
        .unwrap();
    state
        .captains
        .update_location(captain.id, latitude, longitude)
        .await
        .unwrap()
}
