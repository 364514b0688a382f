//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones que pueden involucrar múltiples
//! repositorios o integraciones externas.

pub mod captain_service;
pub mod fare_service;
pub mod otp_service;
pub mod ride_service;
pub mod routing_service;
pub mod token_service;

pub use captain_service::{CaptainService, NearbyCaptain};
pub use fare_service::{FareQuote, FareService};
pub use otp_service::generate_otp;
pub use ride_service::RideService;
pub use routing_service::{MapboxRoutingService, RouteEstimate, RoutingProvider};
pub use token_service::TokenRevocationService;
