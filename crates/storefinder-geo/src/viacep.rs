//! Postal lookup against the `ViaCEP` directory (`/ws/{cep}/json/`).
//!
//! `ViaCEP` reports unknown codes with a 200 response carrying `"erro": true`,
//! so "not found" is read from the payload rather than the HTTP status.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use storefinder_core::PostalAddress;

use crate::error::LookupError;
use crate::http::{build_client, get_json, parse_base_url};
use crate::lookup::PostalLookup;

const DEFAULT_BASE_URL: &str = "https://viacep.com.br/";
const CEP_DIGITS: usize = 8;

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    cep: Option<String>,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
}

impl ViaCepResponse {
    /// `erro` has been observed both as a boolean and as the string `"true"`.
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// City-wide codes omit street and neighborhood; locality and region
    /// are always present on a real hit.
    fn into_address(self, postal_code: &str) -> Result<PostalAddress, LookupError> {
        let present = |field: Option<String>| field.filter(|v| !v.trim().is_empty());
        let (Some(locality), Some(region)) = (present(self.localidade), present(self.uf)) else {
            return Err(LookupError::Unavailable(format!(
                "postal directory returned no address for {postal_code}"
            )));
        };
        Ok(PostalAddress {
            postal_code: self.cep.unwrap_or_else(|| postal_code.to_owned()),
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            locality,
            region,
        })
    }
}

/// Strips punctuation and whitespace from a CEP.
///
/// Returns `None` unless exactly eight digits remain.
#[must_use]
pub fn normalize_postal_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | ' '))
    {
        return None;
    }
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == CEP_DIGITS).then_some(digits)
}

/// HTTP client for the `ViaCEP` postal directory.
pub struct ViaCepClient {
    client: Client,
    base_url: Url,
}

impl ViaCepClient {
    /// Creates a client pointed at the public `ViaCEP` service.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LookupError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
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

    fn lookup_url(&self, cep: &str) -> Result<Url, LookupError> {
        self.base_url
            .join(&format!("ws/{cep}/json/"))
            .map_err(|e| LookupError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    async fn resolve(&self, postal_code: &str) -> Result<PostalAddress, LookupError> {
        let Some(cep) = normalize_postal_code(postal_code) else {
            tracing::debug!(postal_code, "malformed postal code, skipping lookup");
            return Err(LookupError::NotFound {
                query: postal_code.to_owned(),
            });
        };

        let url = self.lookup_url(&cep)?;
        tracing::debug!(%url, "resolving postal code");
        let response: ViaCepResponse = get_json(&self.client, &url).await?;

        if response.is_not_found() {
            return Err(LookupError::NotFound { query: cep });
        }
        response.into_address(&cep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_common_formats() {
        assert_eq!(normalize_postal_code("01310-100").as_deref(), Some("01310100"));
        assert_eq!(normalize_postal_code(" 01310100 ").as_deref(), Some("01310100"));
        assert_eq!(normalize_postal_code("01.310-100").as_deref(), Some("01310100"));
    }

    #[test]
    fn normalize_rejects_wrong_length_or_letters() {
        assert_eq!(normalize_postal_code("0131010"), None);
        assert_eq!(normalize_postal_code("013101000"), None);
        assert_eq!(normalize_postal_code("0131A100"), None);
        assert_eq!(normalize_postal_code(""), None);
    }

    #[test]
    fn lookup_url_follows_viacep_layout() {
        let client = ViaCepClient::with_base_url(5, "test", "https://viacep.com.br").unwrap();
        let url = client.lookup_url("01310100").unwrap();
        assert_eq!(url.as_str(), "https://viacep.com.br/ws/01310100/json/");
    }

    #[test]
    fn erro_flag_accepts_bool_and_string() {
        let as_bool: ViaCepResponse = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        let as_string: ViaCepResponse = serde_json::from_str(r#"{"erro": "true"}"#).unwrap();
        let absent: ViaCepResponse =
            serde_json::from_str(r#"{"cep": "01310-100", "uf": "SP"}"#).unwrap();
        assert!(as_bool.is_not_found());
        assert!(as_string.is_not_found());
        assert!(!absent.is_not_found());
    }

    #[test]
    fn missing_fields_become_empty_strings() {
        let response: ViaCepResponse = serde_json::from_str(
            r#"{"cep": "69900-000", "logradouro": "", "localidade": "Rio Branco", "uf": "AC"}"#,
        )
        .unwrap();
        let address = response.into_address("69900000").unwrap();
        assert_eq!(address.postal_code, "69900-000");
        assert_eq!(address.street, "");
        assert_eq!(address.neighborhood, "");
        assert_eq!(address.locality, "Rio Branco");
        assert_eq!(address.region, "AC");
    }

    #[test]
    fn response_without_locality_or_region_is_unavailable() {
        for body in [
            "{}",
            "[]",
            r#"{"message": "rate limited"}"#,
            r#"{"cep": "01310-100", "logradouro": "Avenida Paulista"}"#,
            r#"{"cep": "01310-100", "localidade": "São Paulo", "uf": " "}"#,
        ] {
            let response: ViaCepResponse = serde_json::from_str(body).unwrap();
            assert!(!response.is_not_found(), "{body}");
            assert!(
                matches!(response.into_address("01310100"), Err(LookupError::Unavailable(_))),
                "{body}"
            );
        }
    }
}
