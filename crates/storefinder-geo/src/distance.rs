//! Great-circle distance on a spherical Earth.

use storefinder_core::Coordinates;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in decimal degrees.
///
/// Symmetric, non-negative, and zero for identical points. Inputs are
/// trusted to be finite.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// [`distance_km`] over [`Coordinates`].
#[must_use]
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    distance_km(from.latitude, from.longitude, to.latitude, to.longitude)
}
