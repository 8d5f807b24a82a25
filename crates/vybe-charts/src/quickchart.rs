//! QuickChart Renderer
//!
//! Implementation of `ChartRenderer` against a QuickChart-compatible
//! HTTP service (`POST /chart` with a Chart.js config, PNG back).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, instrument, warn};
use vybe_core::error::{BotError, Result};
use vybe_core::{ChartRenderer, ChartSpec};

use crate::chartjs;

pub const DEFAULT_URL: &str = "https://quickchart.io";

/// Renderer configuration
#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Service root, without trailing slash
    pub url: String,

    /// Upper bound on a single render
    pub timeout: Duration,

    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            timeout: Duration::from_secs(60),
            width: 1000,
            height: 500,
        }
    }
}

impl ChartConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str| {
            lookup(key)
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|n| *n > 0)
        };

        Self {
            url: lookup("CHART_RENDER_URL")
                .filter(|v| !v.is_empty())
                .map_or(defaults.url, |v| v.trim_end_matches('/').to_string()),
            timeout: number("CHART_TIMEOUT_SECS")
                .map_or(defaults.timeout, |s| Duration::from_secs(u64::from(s))),
            width: number("CHART_WIDTH").unwrap_or(defaults.width),
            height: number("CHART_HEIGHT").unwrap_or(defaults.height),
        }
    }
}

/// Chart renderer backed by QuickChart
#[derive(Clone, Debug)]
pub struct QuickChartRenderer {
    config: ChartConfig,
    client: Client,
}

impl QuickChartRenderer {
    pub fn new(config: ChartConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotError::Config(format!("chart client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ChartConfig::from_env())
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

fn classify(err: &reqwest::Error) -> BotError {
    if err.is_timeout() {
        BotError::ChartTimeout
    } else {
        BotError::ChartRender(err.to_string())
    }
}

#[async_trait]
impl ChartRenderer for QuickChartRenderer {
    fn name(&self) -> &str {
        "QuickChart"
    }

    #[instrument(skip(self, spec), fields(title = %spec.title, points = spec.points.len()))]
    async fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>> {
        let body = json!({
            "chart": chartjs::config(spec),
            "width": self.config.width,
            "height": self.config.height,
            "format": "png",
            "backgroundColor": "white",
        });

        let response = self
            .client
            .post(format!("{}/chart", self.config.url))
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "chart service returned an error status");
            return Err(BotError::ChartRender(format!("status {status}")));
        }

        let bytes = response.bytes().await.map_err(|e| classify(&e))?;
        if bytes.is_empty() {
            return Err(BotError::ChartRender("empty image".into()));
        }
        debug!(size = bytes.len(), "chart rendered");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn renderer_for(server: &MockServer, timeout: Duration) -> QuickChartRenderer {
        QuickChartRenderer::new(ChartConfig {
            url: server.uri(),
            timeout,
            ..ChartConfig::default()
        })
        .unwrap()
    }

    fn spec() -> ChartSpec {
        ChartSpec::bar("Holders", "Date", "Holders").with_points(vec![("2025-01-01".into(), 3.0)])
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ChartConfig::from_lookup(|key| match key {
            "CHART_RENDER_URL" => Some("http://charts.local/".into()),
            "CHART_TIMEOUT_SECS" => Some("5".into()),
            "CHART_WIDTH" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.url, "http://charts.local");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.width, 1000);
        assert_eq!(config.height, 500);
    }

    #[tokio::test]
    async fn test_render_returns_png() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chart"))
            .and(body_partial_json(json!({"format": "png", "chart": {"type": "bar"}})))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG data".to_vec()))
            .mount(&server)
            .await;

        let bytes = renderer_for(&server, Duration::from_secs(5))
            .render(&spec())
            .await
            .unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chart"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = renderer_for(&server, Duration::from_secs(5))
            .render(&spec())
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::ChartRender(_)));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chart"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"\x89PNG".to_vec())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = renderer_for(&server, Duration::from_millis(50))
            .render(&spec())
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::ChartTimeout));
    }
}
