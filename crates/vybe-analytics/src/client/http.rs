//! HTTP Data Provider
//!
//! `reqwest` client for the Vybe Network REST API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::{DataProvider, Endpoint};
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Live provider backed by the analytics API
#[derive(Clone, Debug)]
pub struct HttpDataProvider {
    config: ApiConfig,
    client: Client,
}

impl HttpDataProvider {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("vybe-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl DataProvider for HttpDataProvider {
    #[instrument(skip(self), fields(endpoint = endpoint.name))]
    async fn get_json(&self, endpoint: &Endpoint) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.config.base_url, endpoint.path);
        let timeout = self.config.timeout(endpoint.weight);
        debug!(path = %endpoint.path_and_query(), ?timeout, "GET");

        let mut request = self.client.get(&url).query(&endpoint.query).timeout(timeout);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "analytics API returned an error status");
            return Err(ApiError::from_status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn name(&self) -> &str {
        "VybeHttp"
    }
}
