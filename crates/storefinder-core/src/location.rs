use serde::{Deserialize, Serialize};

use crate::stores::StoreRecord;

/// A latitude/longitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Structured address resolved from a postal code. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub postal_code: String,
    pub street: String,
    pub neighborhood: String,
    pub locality: String,
    pub region: String,
}

impl PostalAddress {
    /// Free-text query handed to the geocoder.
    ///
    /// Always `street, neighborhood, locality, region` in that order, empty
    /// components included, so the same postal address always produces the
    /// same query.
    #[must_use]
    pub fn geocode_query(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.street, self.neighborhood, self.locality, self.region
        )
    }
}

/// A store paired with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStore {
    #[serde(flatten)]
    pub store: StoreRecord,
    pub distance_km: f64,
}
