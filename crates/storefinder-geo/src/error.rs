use storefinder_core::RepositoryError;
use thiserror::Error;

/// Errors returned by a single upstream lookup (postal directory or geocoder).
///
/// Only [`LookupError::NotFound`] means the input identifies nothing; every
/// other variant means the upstream could not be used.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The upstream answered, and the answer was "no such entry".
    #[error("no match for {query:?}")]
    NotFound { query: String },

    /// Network, TLS, timeout, or non-2xx failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The upstream answered with something unusable, or did not answer in time.
    #[error("{0}")]
    Unavailable(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl LookupError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// The upstream a [`LocateError::Upstream`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    PostalLookup,
    Geocoder,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::PostalLookup => write!(f, "postal lookup service"),
            Service::Geocoder => write!(f, "geocoding service"),
        }
    }
}

/// Coarse outcome category used to pick a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UpstreamUnavailable,
    NoResults,
    Invalid,
    Internal,
}

/// Failure of a proximity search, tagged with the stage that broke down.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("postal code not found: {postal_code}")]
    PostalCodeNotFound { postal_code: String },

    #[error("geolocation not found for postal code {postal_code} (query {query:?})")]
    GeolocationNotFound { postal_code: String, query: String },

    #[error("{service} unavailable: {source}")]
    Upstream {
        service: Service,
        #[source]
        source: LookupError,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no stores found within {radius_km} km")]
    NoResults { radius_km: f64 },

    #[error("radius must be a finite, non-negative number of km, got {0}")]
    InvalidRadius(f64),
}

impl LocateError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PostalCodeNotFound { .. } | Self::GeolocationNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Upstream { .. } => ErrorKind::UpstreamUnavailable,
            Self::NoResults { .. } => ErrorKind::NoResults,
            Self::InvalidRadius(_) => ErrorKind::Invalid,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}
