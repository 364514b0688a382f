//! DTOs de la aplicación
//!
//! Formas de request/response que cruzan la frontera del núcleo.

pub mod captain_dto;
pub mod ride_dto;

pub use captain_dto::*;
pub use ride_dto::*;
