//! Sistema de manejo de errores
//!
//! Este módulo define la taxonomía de errores del núcleo de despacho.
//! Cada fallo se propaga al caller con su tipo intacto; la capa de
//! presentación (externa a este crate) decide cómo mapearlo al usuario.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Campos requeridos ausentes o malformados — culpa del caller, nunca se reintenta
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// La entidad referenciada no existe
    #[error("Not found: {0}")]
    NotFound(String),

    /// La operación no es válida para el estado actual del ciclo de vida,
    /// incluidas las carreras perdidas en escrituras condicionales
    #[error("State conflict: {0}")]
    StateConflict(String),

    /// El caller no tiene derechos sobre la entidad, o el OTP no coincide
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Dependencia externa (routing o persistencia) falló o expiró
    #[error("Upstream provider error: {0}")]
    UpstreamProvider(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::UpstreamProvider(format!("Database error: {}", e))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::UpstreamProvider(format!("HTTP error: {}", e))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation failed: {}", e))
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto de estado
pub fn state_conflict_error(operation: &str, reason: &str) -> AppError {
    AppError::StateConflict(format!("Cannot {}: {}", operation, reason))
}

/// Función helper para crear errores de entrada inválida
pub fn input_error(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}

/// Función helper para crear errores de autorización
pub fn unauthorized_error(message: &str) -> AppError {
    AppError::Unauthorized(message.to_string())
}
