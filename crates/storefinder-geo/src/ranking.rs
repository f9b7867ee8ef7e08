//! Radius filter and distance ordering over a store catalog.
//!
//! Kept separate from the resolver so an indexed or bounding-box candidate
//! search can replace the full scan without touching orchestration.

use storefinder_core::{Coordinates, RankedStore, StoreRecord};

use crate::distance::haversine_km;

/// Ranks `stores` by distance from `origin`, keeping only those within
/// `radius_km` (inclusive).
///
/// The sort is stable: stores at equal distance keep their catalog order.
#[must_use]
pub fn rank_within_radius(
    origin: Coordinates,
    stores: Vec<StoreRecord>,
    radius_km: f64,
) -> Vec<RankedStore> {
    let mut ranked: Vec<RankedStore> = stores
        .into_iter()
        .map(|store| {
            let distance_km = haversine_km(origin, store.coordinates());
            RankedStore { store, distance_km }
        })
        .filter(|ranked| ranked.distance_km <= radius_km)
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
