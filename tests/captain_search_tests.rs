//! Tests de integración de la búsqueda de captains por proximidad

mod common;

use common::{active_captain_at, captain_request, test_state};
use ride_dispatch::models::captain::CaptainStatus;
use ride_dispatch::utils::errors::AppError;
use uuid::Uuid;

// Centro de búsqueda de referencia (París)
const CENTER_LAT: f64 = 48.8566;
const CENTER_LNG: f64 = 2.3522;

#[tokio::test]
async fn test_find_near_filters_and_sorts_ascending() {
    let state = test_state();

    // ~550 m, ~1.1 km y ~2.2 km del centro (0.005/0.01/0.02 grados de latitud)
    let near = active_captain_at(&state, "Cerca", CENTER_LAT + 0.005, CENTER_LNG).await;
    let mid = active_captain_at(&state, "Medio", CENTER_LAT + 0.01, CENTER_LNG).await;
    let far = active_captain_at(&state, "Lejos", CENTER_LAT + 0.02, CENTER_LNG).await;

    // ~55 km: fuera del radio por defecto de 5000 m
    active_captain_at(&state, "Remoto", CENTER_LAT + 0.5, CENTER_LNG).await;

    // Inactive en pleno centro: nunca aparece
    let inactive = state
        .captains
        .create_captain(captain_request("Inactivo"))
        .await
        .unwrap();
    state
        .captains
        .update_location(inactive.id, CENTER_LAT, CENTER_LNG)
        .await
        .unwrap();

    // Active pero sin posición reportada: tampoco aparece
    let unlocated = state
        .captains
        .create_captain(captain_request("SinPosicion"))
        .await
        .unwrap();
    state
        .captains
        .update_status(unlocated.id, CaptainStatus::Active)
        .await
        .unwrap();

    let results = state
        .captains
        .find_near(CENTER_LAT, CENTER_LNG, None)
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].captain.id, near.id);
    assert_eq!(results[1].captain.id, mid.id);
    assert_eq!(results[2].captain.id, far.id);

    for pair in results.windows(2) {
        assert!(pair[0].distance_meters <= pair[1].distance_meters);
    }
    for result in &results {
        assert!(result.distance_meters <= 5_000.0);
        assert_eq!(result.captain.status, CaptainStatus::Active);
    }
}

#[tokio::test]
async fn test_find_near_honors_custom_radius() {
    let state = test_state();

    let near = active_captain_at(&state, "Cerca", CENTER_LAT + 0.005, CENTER_LNG).await;
    active_captain_at(&state, "Medio", CENTER_LAT + 0.01, CENTER_LNG).await;

    let results = state
        .captains
        .find_near(CENTER_LAT, CENTER_LNG, Some(700.0))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].captain.id, near.id);
}

#[tokio::test]
async fn test_find_near_rejects_invalid_input() {
    let state = test_state();

    let result = state.captains.find_near(95.0, CENTER_LNG, None).await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let result = state
        .captains
        .find_near(CENTER_LAT, CENTER_LNG, Some(-100.0))
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_find_near_empty_fleet_returns_empty() {
    let state = test_state();
    let results = state
        .captains
        .find_near(CENTER_LAT, CENTER_LNG, None)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_update_location_validates_coordinates() {
    let state = test_state();
    let captain = state
        .captains
        .create_captain(captain_request("Elena"))
        .await
        .unwrap();

    let result = state
        .captains
        .update_location(captain.id, 120.0, 2.35)
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let updated = state
        .captains
        .update_location(captain.id, 48.85, 2.35)
        .await
        .unwrap();
    let location = updated.location.unwrap();
    assert_eq!(location.latitude, 48.85);
    assert_eq!(location.longitude, 2.35);
}

#[tokio::test]
async fn test_updates_on_unknown_captain_are_not_found() {
    let state = test_state();

    let result = state
        .captains
        .update_status(Uuid::new_v4(), CaptainStatus::Active)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = state
        .captains
        .update_location(Uuid::new_v4(), 48.85, 2.35)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_new_captain_starts_inactive() {
    let state = test_state();
    let captain = state
        .captains
        .create_captain(captain_request("Elena"))
        .await
        .unwrap();

    assert_eq!(captain.status, CaptainStatus::Inactive);
    assert!(captain.location.is_none());

    let fetched = state.captains.find_captain(captain.id).await.unwrap();
    assert_eq!(fetched.id, captain.id);
}
