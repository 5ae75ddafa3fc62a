//! Async HTTP clients for fetching license data from upstream registries.
//!
//! All clients go through the [`HttpFetch`] seam so the resolution logic can
//! be exercised without a network. A non-success status is reported as
//! [`LookupError::Status`]; callers decide whether that is fatal.

pub mod libraries_io;
pub mod maven;
pub mod pypi;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::RegistryConfig;
use crate::error::LookupError;

/// Status and body of a completed GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`LookupError::Status`] unless the status is 2xx.
    pub fn success(self) -> Result<Self, LookupError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(LookupError::Status(self.status))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, LookupError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, LookupError>;
}

/// Production transport backed by `reqwest`.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &RegistryConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(ReqwestFetcher { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, LookupError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Build a URL from a base plus query parameters, percent-encoding values.
pub(crate) fn url_with_query(base: &str, params: &[(&str, &str)]) -> Result<String, LookupError> {
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| LookupError::Parse(format!("invalid registry URL {}: {}", base, e)))
}
