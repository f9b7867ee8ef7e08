//! Postal-code proximity search.
//!
//! Resolves a Brazilian CEP to an address through `ViaCEP`, geocodes the
//! address through Nominatim, and ranks the store catalog by haversine
//! distance from the result. Both lookups sit behind traits
//! ([`PostalLookup`], [`Geocoder`]) so the [`ProximityResolver`] can be
//! driven by fakes.

pub mod distance;
pub mod error;
pub mod lookup;
pub mod nominatim;
pub mod ranking;
pub mod resolver;
pub mod viacep;

mod http;

pub use distance::{distance_km, haversine_km, EARTH_RADIUS_KM};
pub use error::{ErrorKind, LocateError, LookupError, Service};
pub use lookup::{Geocoder, PostalLookup};
pub use nominatim::NominatimClient;
pub use ranking::rank_within_radius;
pub use resolver::{Origin, ProximityResolver, ResolverConfig, DEFAULT_RADIUS_KM};
pub use viacep::{normalize_postal_code, ViaCepClient};
