//! Shared application state
//!
//! Este módulo cablea configuración, pool y repositorios dentro de los
//! servicios. La capa de presentación externa recibe un `AppState` ya
//! armado; los tests lo construyen con repositorios en memoria vía
//! `with_repositories`.

use crate::config::environment::EnvironmentConfig;
use crate::database::connection::create_pool;
use crate::repositories::captain_repository::{CaptainRepository, PgCaptainRepository};
use crate::repositories::revoked_token_repository::{
    PgRevokedTokenRepository, RevokedTokenRepository,
};
use crate::repositories::ride_repository::{PgRideRepository, RideRepository};
use crate::services::captain_service::CaptainService;
use crate::services::fare_service::FareService;
use crate::services::ride_service::RideService;
use crate::services::routing_service::{MapboxRoutingService, RoutingProvider};
use crate::services::token_service::TokenRevocationService;
use crate::utils::errors::{AppError, AppResult};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub rides: RideService,
    pub captains: CaptainService,
    pub tokens: TokenRevocationService,
}

impl AppState {
    /// Cableado de producción: repositorios PostgreSQL + routing Mapbox
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> AppResult<Self> {
        let mapbox_token = config
            .mapbox_token
            .clone()
            .ok_or_else(|| AppError::InvalidInput("MAPBOX_TOKEN must be set".to_string()))?;

        let routing: Arc<dyn RoutingProvider> = Arc::new(MapboxRoutingService::new(mapbox_token));
        let rides: Arc<dyn RideRepository> = Arc::new(PgRideRepository::new(pool.clone()));
        let captains: Arc<dyn CaptainRepository> =
            Arc::new(PgCaptainRepository::new(pool.clone()));
        let tokens: Arc<dyn RevokedTokenRepository> =
            Arc::new(PgRevokedTokenRepository::new(pool));

        Ok(Self::with_repositories(config, rides, captains, tokens, routing))
    }

    /// Cableado con repositorios y proveedor inyectados
    pub fn with_repositories(
        config: EnvironmentConfig,
        rides: Arc<dyn RideRepository>,
        captains: Arc<dyn CaptainRepository>,
        tokens: Arc<dyn RevokedTokenRepository>,
        routing: Arc<dyn RoutingProvider>,
    ) -> Self {
        let fares = FareService::new(routing);
        let ride_service = RideService::new(rides, captains.clone(), fares);
        let captain_service = CaptainService::new(captains, config.search_radius_meters);
        let token_service = TokenRevocationService::new(tokens);

        Self {
            config,
            rides: ride_service,
            captains: captain_service,
            tokens: token_service,
        }
    }

    /// Cargar variables de entorno, conectar a la base de datos y armar el estado
    pub async fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = EnvironmentConfig::default();
        let pool = create_pool(Some(&config.database_url)).await?;

        Self::new(pool, config)
    }
}
