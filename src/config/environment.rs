//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Radio de búsqueda de captains por defecto, en metros
pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 5_000.0;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub database_url: String,
    pub mapbox_token: Option<String>,
    pub search_radius_meters: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            mapbox_token: env::var("MAPBOX_TOKEN").ok(),
            search_radius_meters: env::var("SEARCH_RADIUS_METERS")
                .ok()
                .map(|v| v.parse().expect("SEARCH_RADIUS_METERS must be a valid number"))
                .unwrap_or(DEFAULT_SEARCH_RADIUS_METERS),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
