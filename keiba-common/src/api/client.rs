//! HTTP client for the race data provider
//!
//! One request per call: no retries, no caching. Callers decide whether to
//! re-issue a failed request.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("keiba/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Race data provider errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Connection, DNS or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("API error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Thin JSON-over-HTTP client rooted at a base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::Network(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::Network(format!(
                "invalid base URL {:?}",
                base_url.as_str()
            )));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL with `segments` appended, each percent-encoded
    pub fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        match self.get_optional(segments, query).await? {
            Some(value) => Ok(value),
            None => Err(ProviderError::Api {
                status: StatusCode::NOT_FOUND.as_u16(),
                status_text: "Not Found".to_string(),
            }),
        }
    }

    /// GET and decode a JSON body, mapping 404 to `None`
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Option<T>, ProviderError> {
        let url = self.endpoint_url(segments);
        debug!(url = %url, "Querying race data provider");

        let response = self
            .http_client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
