//! Núcleo de despacho de rides
//!
//! Coordina solicitudes de viaje entre riders y captains: cotización de
//! tarifas, códigos de verificación de un solo uso, matching por
//! proximidad de captains disponibles, y el ciclo de vida estricto de
//! cada ride desde la solicitud hasta su cierre o cancelación. El
//! enrutamiento HTTP, las sesiones y el hash de contraseñas viven en la
//! capa de presentación externa; este crate expone servicios con
//! repositorios inyectables.

pub mod config;
pub mod database;
pub mod dto;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
