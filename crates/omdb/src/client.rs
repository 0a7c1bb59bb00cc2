//! HTTP client for the OMDb title lookup endpoint.
//!
//! Wraps `GET {api_url}?t={title}&type=movie&apikey={key}` using [`reqwest`].

use async_trait::async_trait;
use serde_json::Value;

/// Outcome of a title lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// The provider returned a record. The payload is unvalidated JSON.
    Found(Value),
    /// The provider has no movie with that title.
    NotFound,
}

/// Errors from the OMDb HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum OmdbError {
    /// The HTTP request itself failed (network, DNS, TLS, undecodable body).
    #[error("OMDb request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Anything that can resolve a title to a provider record.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<LookupResult, OmdbError>;
}

/// HTTP client for the OMDb API.
pub struct OmdbClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a client for `api_url` (e.g. `http://www.omdbapi.com/`).
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl MovieLookup for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<LookupResult, OmdbError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("t", title),
                ("type", "movie"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), title, "OMDb returned non-success status");
            return Ok(LookupResult::NotFound);
        }

        let body: Value = response.json().await?;
        Ok(interpret_body(body))
    }
}

/// Classify a successful response body by the provider's own `Response` flag.
///
/// OMDb answers HTTP 200 even for misses, with `"Response": "False"`.
pub fn interpret_body(body: Value) -> LookupResult {
    match body.get("Response").and_then(Value::as_str) {
        Some("True") => LookupResult::Found(body),
        _ => LookupResult::NotFound,
    }
}
