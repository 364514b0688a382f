//! Ciclo de vida de rides
//!
//! Máquina de estados central: crea rides (fare + OTP), asigna captains
//! y avanza o cancela cada ride con verificaciones de invariantes. Las
//! transiciones se materializan como escrituras condicionales del
//! repositorio, así que la garantía de un único ganador no depende de
//! locks en memoria.

use crate::dto::ride_dto::{
    CompleteRideRequest, ConfirmRideRequest, CreateRideRequest, StartRideRequest,
};
use crate::models::ride::{Ride, RideStatus};
use crate::repositories::captain_repository::CaptainRepository;
use crate::repositories::ride_repository::RideRepository;
use crate::services::fare_service::FareService;
use crate::services::otp_service::generate_otp;
use crate::utils::errors::{
    input_error, not_found_error, state_conflict_error, unauthorized_error, AppResult,
};
use crate::utils::validation::validate_positive;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Longitud del código de un solo uso mostrado al rider
const OTP_DIGITS: u32 = 6;

#[derive(Clone)]
pub struct RideService {
    rides: Arc<dyn RideRepository>,
    captains: Arc<dyn CaptainRepository>,
    fares: FareService,
}

impl RideService {
    pub fn new(
        rides: Arc<dyn RideRepository>,
        captains: Arc<dyn CaptainRepository>,
        fares: FareService,
    ) -> Self {
        Self {
            rides,
            captains,
            fares,
        }
    }

    /// Crear un ride nuevo en estado pending
    ///
    /// Calcula el fare vía FareService para el tipo de vehículo pedido y
    /// genera un OTP fresco. El ride devuelto incluye el OTP; quién puede
    /// verlo lo decide el caller.
    pub async fn create_ride(&self, request: CreateRideRequest) -> AppResult<Ride> {
        request.validate()?;

        let quote = self.fares.quote(&request.pickup, &request.destination).await?;
        let fare = quote.fare_for(request.vehicle_type);
        let otp = generate_otp(OTP_DIGITS)?;

        let ride = Ride::new(
            request.rider_id,
            request.pickup,
            request.destination,
            request.vehicle_type,
            fare,
            otp,
        );
        let ride = self.rides.create(ride).await?;

        info!(
            "🚕 Ride {} creado en pending ({}: fare {})",
            ride.id,
            ride.vehicle_type.as_str(),
            ride.fare
        );
        Ok(ride)
    }

    /// Aceptación de un captain: pending → accepted
    ///
    /// Como máximo una confirmación exitosa por ride aunque varios
    /// captains acepten a la vez; los perdedores reciben StateConflict.
    pub async fn confirm_ride(&self, request: ConfirmRideRequest) -> AppResult<Ride> {
        self.captains
            .find_by_id(request.captain_id)
            .await?
            .ok_or_else(|| not_found_error("Captain", &request.captain_id.to_string()))?;

        self.rides
            .find_by_id(request.ride_id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &request.ride_id.to_string()))?;

        match self
            .rides
            .accept_if_pending(request.ride_id, request.captain_id)
            .await?
        {
            Some(ride) => {
                info!("✅ Ride {} aceptado por captain {}", ride.id, request.captain_id);
                Ok(ride)
            }
            None => {
                warn!(
                    "⚔️ Captain {} perdió la aceptación del ride {}",
                    request.captain_id, request.ride_id
                );
                Err(state_conflict_error(
                    "confirm ride",
                    "ride is no longer pending",
                ))
            }
        }
    }

    /// Inicio del viaje: accepted → ongoing, con el OTP como compuerta
    pub async fn start_ride(&self, request: StartRideRequest) -> AppResult<Ride> {
        let ride = self
            .rides
            .find_by_id(request.ride_id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &request.ride_id.to_string()))?;

        if ride.status != RideStatus::Accepted {
            return Err(state_conflict_error(
                "start ride",
                &format!("ride is {}, not accepted", ride.status.as_str()),
            ));
        }

        if ride.otp != request.otp {
            warn!("🔐 OTP inválido para el ride {}", ride.id);
            return Err(unauthorized_error("Invalid OTP"));
        }

        match self.rides.start_if_accepted(request.ride_id).await? {
            Some(ride) => {
                info!("🛣️ Ride {} en curso", ride.id);
                Ok(ride)
            }
            None => Err(state_conflict_error(
                "start ride",
                "ride is no longer accepted",
            )),
        }
    }

    /// Cierre del viaje: ongoing → completed, registrando duración y distancia
    pub async fn complete_ride(&self, request: CompleteRideRequest) -> AppResult<Ride> {
        validate_positive(request.duration_seconds)
            .map_err(|_| input_error("Duration must be positive"))?;
        validate_positive(request.distance_meters)
            .map_err(|_| input_error("Distance must be positive"))?;

        let ride = self
            .rides
            .find_by_id(request.ride_id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &request.ride_id.to_string()))?;

        if ride.captain_id != Some(request.captain_id) {
            return Err(unauthorized_error("Not authorized to complete this ride"));
        }

        if ride.status != RideStatus::Ongoing {
            return Err(state_conflict_error(
                "complete ride",
                &format!("ride is {}, not ongoing", ride.status.as_str()),
            ));
        }

        // La escritura re-verifica 'ongoing': un caller con estado viejo
        // (p. ej. reintentando tras una cancelación) no puede pisar un
        // estado terminal.
        match self
            .rides
            .complete_if_ongoing(request.ride_id, request.duration_seconds, request.distance_meters)
            .await?
        {
            Some(ride) => {
                info!(
                    "🏁 Ride {} completado ({} s, {:.0} m)",
                    ride.id, request.duration_seconds, request.distance_meters
                );
                Ok(ride)
            }
            None => Err(state_conflict_error(
                "complete ride",
                "ride is no longer ongoing",
            )),
        }
    }

    /// Cancelación desde pending, accepted u ongoing
    ///
    /// Captain, fare y OTP quedan intactos para auditoría.
    pub async fn cancel_ride(&self, ride_id: Uuid) -> AppResult<Ride> {
        let ride = self
            .rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &ride_id.to_string()))?;

        if ride.status == RideStatus::Completed {
            return Err(state_conflict_error(
                "cancel ride",
                "ride is already completed",
            ));
        }

        match self.rides.cancel_if_active(ride_id).await? {
            Some(ride) => {
                info!("🚫 Ride {} cancelado", ride.id);
                Ok(ride)
            }
            None => Err(state_conflict_error(
                "cancel ride",
                "ride is no longer cancellable",
            )),
        }
    }

    // --- Consultas de solo lectura ---

    pub async fn find_ride(&self, ride_id: Uuid) -> AppResult<Ride> {
        self.rides
            .find_by_id(ride_id)
            .await?
            .ok_or_else(|| not_found_error("Ride", &ride_id.to_string()))
    }

    pub async fn rides_by_rider(&self, rider_id: Uuid) -> AppResult<Vec<Ride>> {
        self.rides.find_by_rider(rider_id).await
    }

    pub async fn rides_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>> {
        self.rides.find_by_captain(captain_id).await
    }

    pub async fn rides_by_status(&self, status: RideStatus) -> AppResult<Vec<Ride>> {
        self.rides.find_by_status(status).await
    }

    /// Rides pendientes, el más antiguo primero
    pub async fn pending_rides(&self) -> AppResult<Vec<Ride>> {
        self.rides.find_pending().await
    }

    pub async fn ongoing_rides_by_captain(&self, captain_id: Uuid) -> AppResult<Vec<Ride>> {
        self.rides.find_ongoing_by_captain(captain_id).await
    }

    /// Los N rides creados más recientemente
    pub async fn recent_rides(&self, limit: i64) -> AppResult<Vec<Ride>> {
        self.rides.find_recent(limit).await
    }
}
