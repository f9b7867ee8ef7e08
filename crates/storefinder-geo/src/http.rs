//! Shared HTTP plumbing for the upstream clients.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::LookupError;

/// Builds a `reqwest` client with an overall request timeout and a fixed
/// `User-Agent`.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, LookupError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parses `base_url`, normalised to end with exactly one slash so relative
/// joins append to its path instead of replacing the last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, LookupError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| LookupError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Sends a GET request, asserts a 2xx HTTP status, and parses the body as `T`.
///
/// # Errors
///
/// Returns [`LookupError::Http`] on network failure or a non-2xx status.
/// Returns [`LookupError::Deserialize`] if the body does not match `T`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &Url,
) -> Result<T, LookupError> {
    let response = client.get(url.clone()).send().await?;
    let response = response.error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| LookupError::Deserialize {
        context: url.path().to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_url_appends_single_trailing_slash() {
        let url = parse_base_url("https://viacep.com.br").unwrap();
        assert_eq!(url.as_str(), "https://viacep.com.br/");

        let url = parse_base_url("http://127.0.0.1:8080/geo//").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/geo/");
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, LookupError::InvalidBaseUrl { .. }));
    }
}
