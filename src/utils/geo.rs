//! Cálculo de distancias geográficas
//!
//! Distancia de círculo máximo entre dos coordenadas usando la fórmula
//! de Haversine. Suficiente para el filtrado por radio de la flota; un
//! índice espacial puede reemplazar el full-scan sin cambiar este módulo.

/// Radio medio de la Tierra en metros
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distancia Haversine en metros entre dos pares (lat, lng) en grados
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
