//! Gestión de captains y búsqueda por proximidad
//!
//! Filtra y ordena la flota disponible por distancia Haversine al punto
//! de pickup. El full-scan con filtrado es O(n) y suficiente a escala de
//! flota pequeña; un índice espacial podría sustituirlo como pre-filtro
//! sin cambiar el contrato.

use crate::dto::captain_dto::CreateCaptainRequest;
use crate::models::captain::{Captain, CaptainStatus, Location, VehicleInfo};
use crate::repositories::captain_repository::CaptainRepository;
use crate::utils::errors::{input_error, not_found_error, AppResult};
use crate::utils::geo::haversine_distance;
use crate::utils::validation::validate_coordinates;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Un captain dentro del resultado de búsqueda, con su distancia al pickup
#[derive(Debug, Clone)]
pub struct NearbyCaptain {
    pub captain: Captain,
    pub distance_meters: f64,
}

#[derive(Clone)]
pub struct CaptainService {
    captains: Arc<dyn CaptainRepository>,
    default_radius_meters: f64,
}

impl CaptainService {
    pub fn new(captains: Arc<dyn CaptainRepository>, default_radius_meters: f64) -> Self {
        Self {
            captains,
            default_radius_meters,
        }
    }

    /// Registrar un captain nuevo (arranca inactive, sin posición)
    pub async fn create_captain(&self, request: CreateCaptainRequest) -> AppResult<Captain> {
        request.validate()?;

        let vehicle = VehicleInfo::new(
            request.vehicle.color,
            request.vehicle.plate,
            request.vehicle.capacity,
            request.vehicle.vehicle_type,
        )?;
        let captain = Captain::new(request.name, vehicle)?;
        let captain = self.captains.create(captain).await?;

        info!("🧑‍✈️ Captain {} registrado", captain.id);
        Ok(captain)
    }

    pub async fn find_captain(&self, captain_id: Uuid) -> AppResult<Captain> {
        self.captains
            .find_by_id(captain_id)
            .await?
            .ok_or_else(|| not_found_error("Captain", &captain_id.to_string()))
    }

    /// Cambio de disponibilidad del propio captain
    pub async fn update_status(
        &self,
        captain_id: Uuid,
        status: CaptainStatus,
    ) -> AppResult<Captain> {
        self.captains
            .update_status(captain_id, status)
            .await?
            .ok_or_else(|| not_found_error("Captain", &captain_id.to_string()))
    }

    /// Reporte de posición del propio captain
    pub async fn update_location(
        &self,
        captain_id: Uuid,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Captain> {
        let location = Location::new(latitude, longitude)?;

        self.captains
            .update_location(captain_id, location)
            .await?
            .ok_or_else(|| not_found_error("Captain", &captain_id.to_string()))
    }

    /// Captains activos a menos de `radius_meters` del punto dado,
    /// ordenados por distancia ascendente (empates por id)
    pub async fn find_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: Option<f64>,
    ) -> AppResult<Vec<NearbyCaptain>> {
        validate_coordinates(latitude, longitude)
            .map_err(|e| input_error(&format!("Invalid search coordinates: {}", e.code)))?;

        let radius = radius_meters.unwrap_or(self.default_radius_meters);
        if radius <= 0.0 {
            return Err(input_error("Search radius must be positive"));
        }

        let candidates = self.captains.find_active().await?;

        let mut nearby: Vec<NearbyCaptain> = candidates
            .into_iter()
            .filter_map(|captain| {
                let location = captain.location?;
                let distance_meters = haversine_distance(
                    latitude,
                    longitude,
                    location.latitude,
                    location.longitude,
                );
                (distance_meters <= radius).then_some(NearbyCaptain {
                    captain,
                    distance_meters,
                })
            })
            .collect();

        // Empates rotos por id para que el orden sea determinista
        nearby.sort_by(|a, b| {
            a.distance_meters
                .partial_cmp(&b.distance_meters)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.captain.id.cmp(&b.captain.id))
        });

        info!(
            "📍 {} captains activos a ≤{:.0} m de ({}, {})",
            nearby.len(),
            radius,
            latitude,
            longitude
        );
        Ok(nearby)
    }
}
