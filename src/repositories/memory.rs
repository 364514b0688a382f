//! Repositorios en memoria
//!
//! Implementaciones fake sobre `tokio::sync::RwLock<HashMap>` para tests
//! y entornos sin base de datos. Las escrituras condicionales hacen el
//! check-and-set bajo el write lock, así que conservan la garantía de
//! un único ganador dentro del proceso.

use crate::models::captain::{Captain, CaptainStatus, Location};
use crate::models::revoked_token::RevokedToken;
use crate::models::ride::{Ride, RideStatus};
use crate::repositories::captain_repository::CaptainRepository;
use crate::repositories::revoked_token_repository::RevokedTokenRepository;
use crate::repositories::ride_repository::RideRepository;
use crate::utils::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryRideRepository {
    rides: RwLock<HashMap<Uuid, Ride>>,
}

impl InMemoryRideRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_desc(mut rides: Vec<Ride>) -> Vec<Ride> {
    rides.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    rides
}

#[async_trait]
impl RideRepository for InMemoryRideRepository {
    async fn create(&self, ride: Ride) -> AppResult<Ride> {
        let mut rides = self.rides.write().await;
        rides.insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let rides = self.rides.read().await;
        Ok(rides.get(&id).cloned())
    }

    async fn find_by_rider(&self, rider_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = self.rides.read().await;
        Ok(sorted_desc(
            rides.values().filter(|r| r.rider_id == rider_id).cloned().collect(),
        ))
    }

    async fn find_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = self.rides.read().await;
        Ok(sorted_desc(
            rides
                .values()
                .filter(|r| r.captain_id == Some(captain_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_status(&self, status: RideStatus) -> AppResult<Vec<Ride>> {
        let rides = self.rides.read().await;
        Ok(sorted_desc(
            rides.values().filter(|r| r.status == status).cloned().collect(),
        ))
    }

    async fn find_pending(&self) -> AppResult<Vec<Ride>> {
        let rides = self.rides.read().await;
        let mut pending: Vec<Ride> = rides
            .values()
            .filter(|r| r.status == RideStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(pending)
    }

    async fn find_ongoing_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>> {
        let rides = self.rides.read().await;
        Ok(sorted_desc(
            rides
                .values()
                .filter(|r| r.captain_id == Some(captain_id) && r.status == RideStatus::Ongoing)
                .cloned()
                .collect(),
        ))
    }

    async fn find_recent(&self, limit: i64) -> AppResult<Vec<Ride>> {
        let rides = self.rides.read().await;
        let mut recent = sorted_desc(rides.values().cloned().collect());
        recent.truncate(limit.max(0) as usize);
        Ok(recent)
    }

    async fn accept_if_pending(&self, id: Uuid, captain_id: Uuid) -> AppResult<Option<Ride>> {
        let mut rides = self.rides.write().await;
        match rides.get_mut(&id) {
            Some(ride) if ride.status == RideStatus::Pending => {
                ride.captain_id = Some(captain_id);
                ride.status = RideStatus::Accepted;
                ride.updated_at = Utc::now();
                Ok(Some(ride.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn start_if_accepted(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let mut rides = self.rides.write().await;
        match rides.get_mut(&id) {
            Some(ride) if ride.status == RideStatus::Accepted => {
                ride.status = RideStatus::Ongoing;
                ride.updated_at = Utc::now();
                Ok(Some(ride.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn complete_if_ongoing(
        &self,
        id: Uuid,
        duration_seconds: i64,
        distance_meters: f64,
    ) -> AppResult<Option<Ride>> {
        let mut rides = self.rides.write().await;
        match rides.get_mut(&id) {
            Some(ride) if ride.status == RideStatus::Ongoing => {
                ride.status = RideStatus::Completed;
                ride.duration_seconds = Some(duration_seconds);
                ride.distance_meters = Some(distance_meters);
                ride.updated_at = Utc::now();
                Ok(Some(ride.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn cancel_if_active(&self, id: Uuid) -> AppResult<Option<Ride>> {
        let mut rides = self.rides.write().await;
        match rides.get_mut(&id) {
            Some(ride) if ride.status.is_cancellable() => {
                ride.status = RideStatus::Cancelled;
                ride.updated_at = Utc::now();
                Ok(Some(ride.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct InMemoryCaptainRepository {
    captains: RwLock<HashMap<Uuid, Captain>>,
}

impl InMemoryCaptainRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CaptainRepository for InMemoryCaptainRepository {
    async fn create(&self, captain: Captain) -> AppResult<Captain> {
        let mut captains = self.captains.write().await;
        captains.insert(captain.id, captain.clone());
        Ok(captain)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Captain>> {
        let captains = self.captains.read().await;
        Ok(captains.get(&id).cloned())
    }

    async fn find_active(&self) -> AppResult<Vec<Captain>> {
        let captains = self.captains.read().await;
        Ok(captains
            .values()
            .filter(|c| c.status == CaptainStatus::Active)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: CaptainStatus) -> AppResult<Option<Captain>> {
        let mut captains = self.captains.write().await;
        match captains.get_mut(&id) {
            Some(captain) => {
                captain.status = status;
                captain.updated_at = Utc::now();
                Ok(Some(captain.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update_location(&self, id: Uuid, location: Location) -> AppResult<Option<Captain>> {
        let mut captains = self.captains.write().await;
        match captains.get_mut(&id) {
            Some(captain) => {
                captain.location = Some(location);
                captain.updated_at = Utc::now();
                Ok(Some(captain.clone()))
            }
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct InMemoryRevokedTokenRepository {
    tokens: RwLock<HashMap<String, RevokedToken>>,
}

impl InMemoryRevokedTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevokedTokenRepository for InMemoryRevokedTokenRepository {
    async fn insert_if_absent(
        &self,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<RevokedToken> {
        let mut tokens = self.tokens.write().await;
        let record = tokens
            .entry(token.to_string())
            .or_insert_with(|| RevokedToken::new(token.to_string(), expires_at));
        Ok(record.clone())
    }

    async fn exists(&self, token: &str) -> AppResult<bool> {
        let tokens = self.tokens.read().await;
        Ok(tokens.contains_key(token))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, record| !record.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}
