//! Modelo de RevokedToken
//!
//! Tokens de sesión invalidados lógicamente antes de su expiración
//! natural. Se crean en logout, nunca se mutan, y solo los elimina
//! la limpieza de expirados.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// RevokedToken - mapea a la tabla revoked_tokens
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevokedToken {
    pub id: Uuid,
    /// El token en sí es lógicamente único
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl RevokedToken {
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            created_at: Utc::now(),
            expires_at,
        }
    }

    /// Un registro sin expiración nunca caduca
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at < now,
            None => false,
        }
    }
}
