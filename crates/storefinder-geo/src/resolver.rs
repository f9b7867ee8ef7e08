//! Postal code → address → coordinates → ranked nearby stores.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use storefinder_core::{
    AppConfig, Coordinates, PostalAddress, RankedStore, RepositoryError, StoreRepository,
};

use crate::error::{LocateError, LookupError, Service};
use crate::lookup::{Geocoder, PostalLookup};
use crate::nominatim::NominatimClient;
use crate::ranking::rank_within_radius;
use crate::viacep::ViaCepClient;

pub const DEFAULT_RADIUS_KM: f64 = 100.0;
const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    /// Radius used by [`ProximityResolver::find_nearby_default`].
    pub default_radius_km: f64,
    /// Upper bound for each of the three outbound steps of a search.
    pub step_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_radius_km: config.default_radius_km,
            step_timeout: Duration::from_secs(config.upstream_timeout_secs),
        }
    }
}

/// Where a postal code resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub address: PostalAddress,
    pub query: String,
    pub coordinates: Coordinates,
}

/// Finds stores near a postal code.
///
/// Holds no mutable state; one instance serves concurrent searches.
pub struct ProximityResolver {
    postal: Arc<dyn PostalLookup>,
    geocoder: Arc<dyn Geocoder>,
    stores: Arc<dyn StoreRepository>,
    config: ResolverConfig,
}

impl ProximityResolver {
    #[must_use]
    pub fn new(
        postal: Arc<dyn PostalLookup>,
        geocoder: Arc<dyn Geocoder>,
        stores: Arc<dyn StoreRepository>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            postal,
            geocoder,
            stores,
            config,
        }
    }

    /// Wires the `ViaCEP` and Nominatim clients configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if either HTTP client cannot be built or a
    /// base URL does not parse.
    pub fn from_app_config(
        config: &AppConfig,
        stores: Arc<dyn StoreRepository>,
    ) -> Result<Self, LookupError> {
        let postal = ViaCepClient::with_base_url(
            config.upstream_timeout_secs,
            &config.http_user_agent,
            &config.postal_lookup_url,
        )?;
        let geocoder = NominatimClient::with_base_url(
            config.upstream_timeout_secs,
            &config.http_user_agent,
            &config.geocoder_url,
        )?;
        Ok(Self::new(
            Arc::new(postal),
            Arc::new(geocoder),
            stores,
            ResolverConfig::from_app_config(config),
        ))
    }

    #[must_use]
    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// [`Self::find_nearby`] with the configured default radius.
    ///
    /// # Errors
    ///
    /// See [`Self::find_nearby`].
    pub async fn find_nearby_default(
        &self,
        postal_code: &str,
    ) -> Result<Vec<RankedStore>, LocateError> {
        self.find_nearby(postal_code, self.config.default_radius_km)
            .await
    }

    /// Returns stores within `radius_km` of `postal_code`, nearest first.
    ///
    /// # Errors
    ///
    /// - [`LocateError::InvalidRadius`] before any lookup if `radius_km` is
    ///   negative or not finite.
    /// - [`LocateError::PostalCodeNotFound`] / [`LocateError::GeolocationNotFound`]
    ///   when a lookup finds nothing; later steps are skipped.
    /// - [`LocateError::Upstream`] when a lookup fails or times out.
    /// - [`LocateError::Repository`] when the catalog cannot be read.
    /// - [`LocateError::NoResults`] when no store lies within the radius.
    pub async fn find_nearby(
        &self,
        postal_code: &str,
        radius_km: f64,
    ) -> Result<Vec<RankedStore>, LocateError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(LocateError::InvalidRadius(radius_km));
        }

        let origin = self.resolve_origin(postal_code).await?;

        let catalog = within(self.config.step_timeout, self.stores.list_all())
            .await
            .unwrap_or_else(|elapsed| Err(RepositoryError::new(elapsed)))
            .inspect_err(|e| tracing::error!(error = %e, "store catalog read failed"))?;
        let catalog_size = catalog.len();

        let ranked = rank_within_radius(origin.coordinates, catalog, radius_km);
        tracing::info!(
            postal_code,
            radius_km,
            catalog_size,
            matches = ranked.len(),
            "proximity search complete"
        );

        if ranked.is_empty() {
            return Err(LocateError::NoResults { radius_km });
        }
        Ok(ranked)
    }

    /// Runs the two lookups: postal code to address, address to coordinates.
    ///
    /// # Errors
    ///
    /// [`LocateError::PostalCodeNotFound`], [`LocateError::GeolocationNotFound`],
    /// or [`LocateError::Upstream`].
    pub async fn resolve_origin(&self, postal_code: &str) -> Result<Origin, LocateError> {
        let step_timeout = self.config.step_timeout;

        let address = within(step_timeout, self.postal.resolve(postal_code))
            .await
            .unwrap_or_else(|_| Err(timed_out(step_timeout)))
            .map_err(|e| {
                stage_error(Service::PostalLookup, e, || LocateError::PostalCodeNotFound {
                    postal_code: postal_code.to_owned(),
                })
            })?;
        tracing::debug!(postal_code, locality = %address.locality, "postal code resolved");

        let query = address.geocode_query();
        let coordinates = within(step_timeout, self.geocoder.resolve(&query))
            .await
            .unwrap_or_else(|_| Err(timed_out(step_timeout)))
            .map_err(|e| {
                stage_error(Service::Geocoder, e, || LocateError::GeolocationNotFound {
                    postal_code: postal_code.to_owned(),
                    query: query.clone(),
                })
            })?;
        tracing::debug!(
            postal_code,
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "address geocoded"
        );

        Ok(Origin {
            address,
            query,
            coordinates,
        })
    }
}

async fn within<F: Future>(
    limit: Duration,
    future: F,
) -> Result<F::Output, tokio::time::error::Elapsed> {
    tokio::time::timeout(limit, future).await
}

fn timed_out(limit: Duration) -> LookupError {
    LookupError::Unavailable(format!("no response within {limit:?}"))
}

fn stage_error(
    service: Service,
    error: LookupError,
    not_found: impl FnOnce() -> LocateError,
) -> LocateError {
    if error.is_not_found() {
        tracing::debug!(%service, error = %error, "lookup found nothing");
        not_found()
    } else {
        tracing::warn!(%service, error = %error, "upstream lookup failed");
        LocateError::Upstream {
            service,
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefinder_core::Environment;

    fn app_config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/storefinder".to_owned(),
            env: Environment::Test,
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            log_level: "debug".to_owned(),
            db_max_connections: 2,
            db_min_connections: 1,
            db_acquire_timeout_secs: 5,
            postal_lookup_url: "http://127.0.0.1:1".to_owned(),
            geocoder_url: "http://127.0.0.1:2".to_owned(),
            http_user_agent: "storefinder-test/0.1".to_owned(),
            upstream_timeout_secs: 3,
            default_radius_km: 25.0,
        }
    }

    #[test]
    fn resolver_config_follows_app_config() {
        let config = ResolverConfig::from_app_config(&app_config());
        assert!((config.default_radius_km - 25.0).abs() < f64::EPSILON);
        assert_eq!(config.step_timeout, Duration::from_secs(3));
    }

    #[test]
    fn resolver_rejects_unparseable_upstream_url() {
        let mut config = app_config();
        config.geocoder_url = "not a url".to_owned();
        let stores: Arc<dyn StoreRepository> = Arc::new(Empty);

        let err = ProximityResolver::from_app_config(&config, stores)
            .err()
            .expect("bad base URL must be rejected");
        assert!(matches!(err, LookupError::InvalidBaseUrl { .. }), "{err:?}");
    }

    struct Empty;

    #[async_trait::async_trait]
    impl StoreRepository for Empty {
        async fn insert(
            &self,
            _store: &storefinder_core::NewStore,
        ) -> Result<i64, RepositoryError> {
            Ok(1)
        }

        async fn list_all(
            &self,
        ) -> Result<Vec<storefinder_core::StoreRecord>, RepositoryError> {
            Ok(Vec::new())
        }
    }
}
