//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod captain;
pub mod revoked_token;
pub mod ride;

pub use captain::{Captain, CaptainStatus, Location, VehicleInfo};
pub use revoked_token::RevokedToken;
pub use ride::{Ride, RideStatus, VehicleType};
