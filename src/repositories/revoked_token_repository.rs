use crate::models::revoked_token::RevokedToken;
use crate::utils::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Acceso a persistencia de tokens revocados
///
/// El insert es condicional (create-if-absent): revocar dos veces el
/// mismo token nunca produce dos registros ni falla, incluso con dos
/// logouts concurrentes del mismo token.
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync {
    async fn insert_if_absent(
        &self,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<RevokedToken>;
    async fn exists(&self, token: &str) -> AppResult<bool>;
    /// Eliminar registros cuyo expires_at ya pasó; devuelve cuántos se borraron
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

pub struct PgRevokedTokenRepository {
    pool: PgPool,
}

impl PgRevokedTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevokedTokenRepository for PgRevokedTokenRepository {
    async fn insert_if_absent(
        &self,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<RevokedToken> {
        let record = RevokedToken::new(token.to_string(), expires_at);

        let inserted = sqlx::query_as::<_, RevokedToken>(
            r#"
            INSERT INTO revoked_tokens (id, token, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (token) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(&record.token)
        .bind(record.created_at)
        .bind(record.expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error revoking token: {}", e)))?;

        match inserted {
            Some(record) => Ok(record),
            // Conflicto: ya estaba revocado, devolver el registro existente
            None => {
                let existing = sqlx::query_as::<_, RevokedToken>(
                    "SELECT * FROM revoked_tokens WHERE token = $1",
                )
                .bind(token)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::UpstreamProvider(format!("Error reading revoked token: {}", e))
                })?;
                Ok(existing)
            }
        }
    }

    async fn exists(&self, token: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token = $1)",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::UpstreamProvider(format!("Error checking token: {}", e)))?;

        Ok(result.0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM revoked_tokens WHERE expires_at IS NOT NULL AND expires_at < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::UpstreamProvider(format!("Error cleaning up expired tokens: {}", e))
        })?;

        Ok(result.rows_affected())
    }
}
