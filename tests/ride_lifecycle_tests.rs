//! Tests de integración del ciclo de vida de rides

mod common;

use common::{active_captain_at, ride_request, test_state};
use ride_dispatch::dto::ride_dto::{
    CompleteRideRequest, ConfirmRideRequest, CreateRideRequest, StartRideRequest,
};
use ride_dispatch::models::ride::{RideStatus, VehicleType};
use ride_dispatch::utils::errors::AppError;
use std::sync::Arc;
use tokio::sync::Barrier;
use uuid::Uuid;

#[tokio::test]
async fn test_create_ride_returns_pending_with_fare_and_otp() {
    let state = test_state();

    let ride = state
        .rides
        .create_ride(ride_request(Uuid::new_v4(), VehicleType::Car))
        .await
        .unwrap();

    // routing fijo: 5000 m / 600 s → car = round(50 + 5*15 + 10*3) = 155
    assert_eq!(ride.status, RideStatus::Pending);
    assert_eq!(ride.fare, 155);
    assert!(ride.captain_id.is_none());
    assert_eq!(ride.otp.len(), 6);
    assert!(ride.otp.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_create_ride_rejects_empty_fields() {
    let state = test_state();

    let request = CreateRideRequest {
        rider_id: Uuid::new_v4(),
        pickup: "".to_string(),
        destination: "Estación Central".to_string(),
        vehicle_type: VehicleType::Auto,
    };

    let result = state.rides.create_ride(request).await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_confirm_unknown_ride_or_captain_is_not_found() {
    let state = test_state();
    let captain = active_captain_at(&state, "Elena", 48.85, 2.35).await;

    let result = state
        .rides
        .confirm_ride(ConfirmRideRequest {
            ride_id: Uuid::new_v4(),
            captain_id: captain.id,
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let ride = state
        .rides
        .create_ride(ride_request(Uuid::new_v4(), VehicleType::Auto))
        .await
        .unwrap();
    let result = state
        .rides
        .confirm_ride(ConfirmRideRequest {
            ride_id: ride.id,
            captain_id: Uuid::new_v4(),
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_full_lifecycle_to_completion() {
    let state = test_state();
    let captain = active_captain_at(&state, "Elena", 48.85, 2.35).await;
    let rider_id = Uuid::new_v4();

    let ride = state
        .rides
        .create_ride(ride_request(rider_id, VehicleType::Car))
        .await
        .unwrap();

    let ride = state
        .rides
        .confirm_ride(ConfirmRideRequest {
            ride_id: ride.id,
            captain_id: captain.id,
        })
        .await
        .unwrap();
    assert_eq!(ride.status, RideStatus::Accepted);
    assert_eq!(ride.captain_id, Some(captain.id));

    // OTP equivocado: Unauthorized y el estado no cambia
    let wrong_otp = if ride.otp == "111111" { "222222" } else { "111111" };
    let result = state
        .rides
        .start_ride(StartRideRequest {
            ride_id: ride.id,
            otp: wrong_otp.to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
    assert_eq!(
        state.rides.find_ride(ride.id).await.unwrap().status,
        RideStatus::Accepted
    );

    let ride = state
        .rides
        .start_ride(StartRideRequest {
            ride_id: ride.id,
            otp: ride.otp.clone(),
        })
        .await
        .unwrap();
    assert_eq!(ride.status, RideStatus::Ongoing);

    // Captain ajeno: Unauthorized
    let intruder = active_captain_at(&state, "Marco", 48.86, 2.36).await;
    let result = state
        .rides
        .complete_ride(CompleteRideRequest {
            ride_id: ride.id,
            captain_id: intruder.id,
            duration_seconds: 540,
            distance_meters: 4_800.0,
        })
        .await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));

    let ride = state
        .rides
        .complete_ride(CompleteRideRequest {
            ride_id: ride.id,
            captain_id: captain.id,
            duration_seconds: 540,
            distance_meters: 4_800.0,
        })
        .await
        .unwrap();
    assert_eq!(ride.status, RideStatus::Completed);
    assert_eq!(ride.duration_seconds, Some(540));
    assert_eq!(ride.distance_meters, Some(4_800.0));

    // Un ride completado ya no se puede cancelar
    let result = state.rides.cancel_ride(ride.id).await;
    assert!(matches!(result, Err(AppError::StateConflict(_))));
}

#[tokio::test]
async fn test_start_requires_accepted_status() {
    let state = test_state();

    let ride = state
        .rides
        .create_ride(ride_request(Uuid::new_v4(), VehicleType::Moto))
        .await
        .unwrap();

    let result = state
        .rides
        .start_ride(StartRideRequest {
            ride_id: ride.id,
            otp: ride.otp.clone(),
        })
        .await;
    assert!(matches!(result, Err(AppError::StateConflict(_))));
}

#[tokio::test]
async fn test_complete_requires_ongoing_status() {
    let state = test_state();
    let captain = active_captain_at(&state, "Elena", 48.85, 2.35).await;

    let ride = state
        .rides
        .create_ride(ride_request(Uuid::new_v4(), VehicleType::Auto))
        .await
        .unwrap();
    state
        .rides
        .confirm_ride(ConfirmRideRequest {
            ride_id: ride.id,
            captain_id: captain.id,
        })
        .await
        .unwrap();

    // accepted, no ongoing: conflicto de estado aunque el captain sea el asignado
    let result = state
        .rides
        .complete_ride(CompleteRideRequest {
            ride_id: ride.id,
            captain_id: captain.id,
            duration_seconds: 300,
            distance_meters: 2_000.0,
        })
        .await;
    assert!(matches!(result, Err(AppError::StateConflict(_))));
}

#[tokio::test]
async fn test_complete_rejects_non_positive_measurements() {
    let state = test_state();

    let result = state
        .rides
        .complete_ride(CompleteRideRequest {
            ride_id: Uuid::new_v4(),
            captain_id: Uuid::new_v4(),
            duration_seconds: 0,
            distance_meters: 1_000.0,
        })
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let result = state
        .rides
        .complete_ride(CompleteRideRequest {
            ride_id: Uuid::new_v4(),
            captain_id: Uuid::new_v4(),
            duration_seconds: 300,
            distance_meters: -5.0,
        })
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_cancel_ongoing_keeps_audit_fields() {
    let state = test_state();
    let captain = active_captain_at(&state, "Elena", 48.85, 2.35).await;

    let ride = state
        .rides
        .create_ride(ride_request(Uuid::new_v4(), VehicleType::Car))
        .await
        .unwrap();
    let otp = ride.otp.clone();
    let fare = ride.fare;

    state
        .rides
        .confirm_ride(ConfirmRideRequest {
            ride_id: ride.id,
            captain_id: captain.id,
        })
        .await
        .unwrap();
    state
        .rides
        .start_ride(StartRideRequest {
            ride_id: ride.id,
            otp: otp.clone(),
        })
        .await
        .unwrap();

    let cancelled = state.rides.cancel_ride(ride.id).await.unwrap();
    assert_eq!(cancelled.status, RideStatus::Cancelled);
    // captain/fare/otp intactos; duración y distancia nunca se fijaron
    assert_eq!(cancelled.captain_id, Some(captain.id));
    assert_eq!(cancelled.fare, fare);
    assert_eq!(cancelled.otp, otp);
    assert!(cancelled.duration_seconds.is_none());
    assert!(cancelled.distance_meters.is_none());
}

#[tokio::test]
async fn test_cancel_pending_ride() {
    let state = test_state();

    let ride = state
        .rides
        .create_ride(ride_request(Uuid::new_v4(), VehicleType::Auto))
        .await
        .unwrap();
    let cancelled = state.rides.cancel_ride(ride.id).await.unwrap();
    assert_eq!(cancelled.status, RideStatus::Cancelled);
    assert!(cancelled.captain_id.is_none());
}

#[tokio::test]
async fn test_concurrent_confirm_has_exactly_one_winner() {
    let state = test_state();
    let captain_a = active_captain_at(&state, "Elena", 48.85, 2.35).await;
    let captain_b = active_captain_at(&state, "Marco", 48.86, 2.36).await;

    let ride = state
        .rides
        .create_ride(ride_request(Uuid::new_v4(), VehicleType::Car))
        .await
        .unwrap();

    let barrier = Arc::new(Barrier::new(2));

    let rides_a = state.rides.clone();
    let barrier_a = barrier.clone();
    let ride_id = ride.id;
    let id_a = captain_a.id;
    let handle_a = tokio::spawn(async move {
        barrier_a.wait().await;
        rides_a
            .confirm_ride(ConfirmRideRequest {
                ride_id,
                captain_id: id_a,
            })
            .await
    });

    let rides_b = state.rides.clone();
    let barrier_b = barrier;
    let id_b = captain_b.id;
    let handle_b = tokio::spawn(async move {
        barrier_b.wait().await;
        rides_b
            .confirm_ride(ConfirmRideRequest {
                ride_id,
                captain_id: id_b,
            })
            .await
    });

    let result_a = handle_a.await.unwrap();
    let result_b = handle_b.await.unwrap();

    // Exactamente un ganador; el perdedor recibe StateConflict
    assert_ne!(result_a.is_ok(), result_b.is_ok());
    let (winner_id, loser_result) = if result_a.is_ok() {
        (captain_a.id, result_b)
    } else {
        (captain_b.id, result_a)
    };
    assert!(matches!(loser_result, Err(AppError::StateConflict(_))));

    let final_ride = state.rides.find_ride(ride.id).await.unwrap();
    assert_eq!(final_ride.status, RideStatus::Accepted);
    assert_eq!(final_ride.captain_id, Some(winner_id));
}

#[tokio::test]
async fn test_queries_ordering_and_filters() {
    let state = test_state();
    let rider_id = Uuid::new_v4();

    let mut created = Vec::new();
    for _ in 0..3 {
        created.push(
            state
                .rides
                .create_ride(ride_request(rider_id, VehicleType::Auto))
                .await
                .unwrap(),
        );
        // timestamps distintos para que el orden sea observable
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let pending = state.rides.pending_rides().await.unwrap();
    assert_eq!(pending.len(), 3);
    assert_eq!(pending[0].id, created[0].id); // el más antiguo primero
    assert_eq!(pending[2].id, created[2].id);

    let recent = state.rides.recent_rides(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, created[2].id); // el más nuevo primero

    let by_rider = state.rides.rides_by_rider(rider_id).await.unwrap();
    assert_eq!(by_rider.len(), 3);

    let captain = active_captain_at(&state, "Elena", 48.85, 2.35).await;
    state
        .rides
        .confirm_ride(ConfirmRideRequest {
            ride_id: created[0].id,
            captain_id: captain.id,
        })
        .await
        .unwrap();
    let otp = created[0].otp.clone();
    state
        .rides
        .start_ride(StartRideRequest {
            ride_id: created[0].id,
            otp,
        })
        .await
        .unwrap();

    let ongoing = state
        .rides
        .ongoing_rides_by_captain(captain.id)
        .await
        .unwrap();
    assert_eq!(ongoing.len(), 1);
    assert_eq!(ongoing[0].id, created[0].id);

    let still_pending = state
        .rides
        .rides_by_status(RideStatus::Pending)
        .await
        .unwrap();
    assert_eq!(still_pending.len(), 2);

    let by_captain = state.rides.rides_by_captain(captain.id).await.unwrap();
    assert_eq!(by_captain.len(), 1);
}
