//! Proveedor de routing externo
//!
//! Resuelve un par pickup/destination a distancia y duración estimadas.
//! La implementación concreta habla con Mapbox (geocoding + directions);
//! los fallos del proveedor se propagan como `UpstreamProvider`, nunca
//! se tragan.

use crate::utils::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;

/// Estimación de ruta devuelta por el proveedor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEstimate {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Colaborador externo de routing
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn resolve(&self, pickup: &str, destination: &str) -> AppResult<RouteEstimate>;
}

#[derive(Debug, Deserialize)]
struct MapboxGeocodingResponse {
    features: Vec<MapboxFeature>,
}

#[derive(Debug, Deserialize)]
struct MapboxFeature {
    geometry: MapboxGeometry,
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<f64>, // [longitude, latitude]
}

#[derive(Debug, Deserialize)]
struct MapboxDirectionsResponse {
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    distance: f64,
    duration: f64,
}

pub struct MapboxRoutingService {
    mapbox_token: String,
    client: reqwest::Client,
}

impl MapboxRoutingService {
    pub fn new(mapbox_token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            mapbox_token,
            client,
        }
    }

    /// Geocodificar una dirección a (longitude, latitude)
    async fn geocode(&self, address: &str) -> AppResult<(f64, f64)> {
        let encoded_address = urlencoding::encode(address);

        let url = format!(
            "https://api.mapbox.com/search/geocode/v6/forward?q={}&access_token={}&limit=1",
            encoded_address, self.mapbox_token
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "RideDispatch/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("❌ Geocoding failed with status {} for '{}'", status, address);
            return Err(AppError::UpstreamProvider(format!(
                "Geocoding failed with status {}",
                status
            )));
        }

        let body: MapboxGeocodingResponse = response.json().await?;

        let feature = body.features.first().ok_or_else(|| {
            AppError::UpstreamProvider(format!("No coordinates found for address '{}'", address))
        })?;

        if feature.geometry.coordinates.len() < 2 {
            return Err(AppError::UpstreamProvider(format!(
                "Malformed geocoding result for address '{}'",
                address
            )));
        }

        Ok((feature.geometry.coordinates[0], feature.geometry.coordinates[1]))
    }
}

#[async_trait]
impl RoutingProvider for MapboxRoutingService {
    async fn resolve(&self, pickup: &str, destination: &str) -> AppResult<RouteEstimate> {
        tracing::info!("🗺️ Resolving route: '{}' -> '{}'", pickup, destination);

        let (pickup_lng, pickup_lat) = self.geocode(pickup).await?;
        let (dest_lng, dest_lat) = self.geocode(destination).await?;

        let url = format!(
            "https://api.mapbox.com/directions/v5/mapbox/driving/{},{};{},{}?access_token={}&overview=false",
            pickup_lng, pickup_lat, dest_lng, dest_lat, self.mapbox_token
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "RideDispatch/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("❌ Directions request failed with status {}", status);
            return Err(AppError::UpstreamProvider(format!(
                "Directions request failed with status {}",
                status
            )));
        }

        let body: MapboxDirectionsResponse = response.json().await?;

        let route = body.routes.first().ok_or_else(|| {
            AppError::UpstreamProvider("No route found between pickup and destination".to_string())
        })?;

        tracing::info!(
            "✅ Route resolved: {:.0} m, {:.0} s",
            route.distance,
            route.duration
        );

        Ok(RouteEstimate {
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
