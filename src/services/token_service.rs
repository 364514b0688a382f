//! Revocación de tokens de sesión
//!
//! Conjunto append-and-lookup de escritura única consumido por la capa
//! de autenticación externa. Sin lógica de transiciones; comparte la
//! disciplina de persistencia y concurrencia del resto del núcleo.

use crate::models::revoked_token::RevokedToken;
use crate::repositories::revoked_token_repository::RevokedTokenRepository;
use crate::utils::errors::{input_error, AppResult};
use crate::utils::validation::validate_not_empty;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::info;

/// Ventana tras la cual un registro de revocación puede limpiarse;
/// coincide con el TTL natural de los tokens de sesión
const REVOKED_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct TokenRevocationService {
    tokens: Arc<dyn RevokedTokenRepository>,
}

impl TokenRevocationService {
    pub fn new(tokens: Arc<dyn RevokedTokenRepository>) -> Self {
        Self { tokens }
    }

    /// Revocar un token; idempotente en efecto (revocar dos veces deja
    /// el token igual de revocado)
    pub async fn revoke(&self, token: &str) -> AppResult<RevokedToken> {
        validate_not_empty(token).map_err(|_| input_error("Token is required"))?;

        let expires_at = Utc::now() + Duration::hours(REVOKED_TOKEN_TTL_HOURS);
        let record = self.tokens.insert_if_absent(token, Some(expires_at)).await?;

        info!("🚷 Token revocado (expira {})", record.expires_at.map(|e| e.to_rfc3339()).unwrap_or_default());
        Ok(record)
    }

    /// ¿Está el token revocado?
    pub async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        self.tokens.exists(token).await
    }

    /// Eliminar registros cuya expiración ya pasó; devuelve cuántos se borraron
    pub async fn cleanup_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let removed = self.tokens.delete_expired(now).await?;
        if removed > 0 {
            info!("🧹 {} tokens revocados expirados eliminados", removed);
        }
        Ok(removed)
    }
}
