//! Repositorios de persistencia
//!
//! Interfaces explícitas inyectadas en cada servicio, con una
//! implementación PostgreSQL y fakes en memoria intercambiables.

pub mod captain_repository;
pub mod memory;
pub mod revoked_token_repository;
pub mod ride_repository;

pub use captain_repository::{CaptainRepository, PgCaptainRepository};
pub use memory::{
    InMemoryCaptainRepository, InMemoryRevokedTokenRepository, InMemoryRideRepository,
};
pub use revoked_token_repository::{PgRevokedTokenRepository, RevokedTokenRepository};
pub use ride_repository::{PgRideRepository, RideRepository};
