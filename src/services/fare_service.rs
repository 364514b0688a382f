//! Cálculo de tarifas
//!
//! Convierte la estimación distancia/duración del proveedor de routing
//! en una cotización por tipo de vehículo. La tabla de tarifas es fija.

use crate::models::ride::VehicleType;
use crate::services::routing_service::{RouteEstimate, RoutingProvider};
use crate::utils::errors::{input_error, AppResult};
use crate::utils::validation::validate_not_empty;
use serde::Serialize;
use std::sync::Arc;

/// Tarifa base por tipo de vehículo, en unidades enteras de moneda
fn base_fare(vehicle_type: VehicleType) -> f64 {
    match vehicle_type {
        VehicleType::Auto => 30.0,
        VehicleType::Car => 50.0,
        VehicleType::Moto => 20.0,
    }
}

/// Tarifa por kilómetro
fn per_km_rate(vehicle_type: VehicleType) -> f64 {
    match vehicle_type {
        VehicleType::Auto => 10.0,
        VehicleType::Car => 15.0,
        VehicleType::Moto => 8.0,
    }
}

/// Tarifa por minuto
fn per_minute_rate(vehicle_type: VehicleType) -> f64 {
    match vehicle_type {
        VehicleType::Auto => 2.0,
        VehicleType::Car => 3.0,
        VehicleType::Moto => 1.5,
    }
}

/// Cotización precalculada para los tres tipos de vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FareQuote {
    pub auto: i64,
    pub car: i64,
    pub moto: i64,
}

impl FareQuote {
    pub fn fare_for(&self, vehicle_type: VehicleType) -> i64 {
        match vehicle_type {
            VehicleType::Auto => self.auto,
            VehicleType::Car => self.car,
            VehicleType::Moto => self.moto,
        }
    }
}

/// fare = round(base + km * per_km + min * per_minute), redondeo half-up
fn compute_fare(vehicle_type: VehicleType, estimate: &RouteEstimate) -> i64 {
    let fare = base_fare(vehicle_type)
        + (estimate.distance_meters / 1000.0) * per_km_rate(vehicle_type)
        + (estimate.duration_seconds / 60.0) * per_minute_rate(vehicle_type);
    fare.round() as i64
}

#[derive(Clone)]
pub struct FareService {
    routing: Arc<dyn RoutingProvider>,
}

impl FareService {
    pub fn new(routing: Arc<dyn RoutingProvider>) -> Self {
        Self { routing }
    }

    /// Cotizar el par pickup/destination para todos los tipos de vehículo
    pub async fn quote(&self, pickup: &str, destination: &str) -> AppResult<FareQuote> {
        validate_not_empty(pickup)
            .map_err(|_| input_error("Pickup and destination are required"))?;
        validate_not_empty(destination)
            .map_err(|_| input_error("Pickup and destination are required"))?;

        let estimate = self.routing.resolve(pickup, destination).await?;

        Ok(FareQuote {
            auto: compute_fare(VehicleType::Auto, &estimate),
            car: compute_fare(VehicleType::Car, &estimate),
            moto: compute_fare(VehicleType::Moto, &estimate),
        })
    }
}
