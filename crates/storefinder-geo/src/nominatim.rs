//! Forward geocoding against an `OpenStreetMap` Nominatim instance.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use storefinder_core::Coordinates;

use crate::error::LookupError;
use crate::http::{build_client, get_json, parse_base_url};
use crate::lookup::Geocoder;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// One search hit. Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
}

impl Candidate {
    fn coordinates(&self) -> Result<Coordinates, LookupError> {
        let parse = |field: &str, raw: &str, limit: f64| -> Result<f64, LookupError> {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && (-limit..=limit).contains(v))
                .ok_or_else(|| {
                    LookupError::Unavailable(format!(
                        "geocoder returned a malformed {field}: {raw:?}"
                    ))
                })
        };
        Ok(Coordinates::new(
            parse("latitude", &self.lat, 90.0)?,
            parse("longitude", &self.lon, 180.0)?,
        ))
    }
}

/// HTTP client for the Nominatim `/search` endpoint.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// Nominatim's usage policy requires an identifying `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LookupError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (self-hosted instance or wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`LookupError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Builds `/search?format=json&q=...` with the query percent-encoded.
    fn search_url(&self, address: &str) -> Result<Url, LookupError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| LookupError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", address);
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn resolve(&self, address: &str) -> Result<Coordinates, LookupError> {
        let url = self.search_url(address)?;
        tracing::debug!(address, "geocoding address");
        let candidates: Vec<Candidate> = get_json(&self.client, &url).await?;

        let Some(first) = candidates.first() else {
            return Err(LookupError::NotFound {
                query: address.to_owned(),
            });
        };
        first.coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NominatimClient {
        NominatimClient::with_base_url(5, "storefinder-test/0.1", "https://nominatim.example.org")
            .expect("client construction should not fail")
    }

    #[test]
    fn search_url_encodes_the_address() {
        let url = client()
            .search_url("Avenida Paulista, Bela Vista, São Paulo, SP")
            .unwrap();
        assert!(url.as_str().starts_with("https://nominatim.example.org/search?format=json&q="));
        let q = url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned());
        assert_eq!(q.as_deref(), Some("Avenida Paulista, Bela Vista, São Paulo, SP"));
        assert!(!url.as_str().contains(' '), "query must be percent-encoded: {url}");
    }

    #[test]
    fn candidate_parses_decimal_strings() {
        let c = Candidate {
            lat: "-23.5613".to_owned(),
            lon: " -46.6565 ".to_owned(),
        };
        assert_eq!(c.coordinates().unwrap(), Coordinates::new(-23.5613, -46.6565));
    }

    #[test]
    fn candidate_with_garbage_coordinates_is_unavailable() {
        let c = Candidate {
            lat: "north-ish".to_owned(),
            lon: "-46.6".to_owned(),
        };
        assert!(matches!(c.coordinates(), Err(LookupError::Unavailable(_))));

        let c = Candidate {
            lat: "NaN".to_owned(),
            lon: "-46.6".to_owned(),
        };
        assert!(matches!(c.coordinates(), Err(LookupError::Unavailable(_))));

        for (lat, lon) in [("95", "-46.6"), ("-90.5", "0"), ("-23.5", "-200"), ("0", "180.01")] {
            let c = Candidate {
                lat: lat.to_owned(),
                lon: lon.to_owned(),
            };
            assert!(
                matches!(c.coordinates(), Err(LookupError::Unavailable(_))),
                "({lat}, {lon}) must be rejected"
            );
        }
    }

    #[test]
    fn candidate_on_range_bounds_is_accepted() {
        let c = Candidate {
            lat: "-90".to_owned(),
            lon: "180".to_owned(),
        };
        assert_eq!(c.coordinates().unwrap(), Coordinates::new(-90.0, 180.0));
    }
}
