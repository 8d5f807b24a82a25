//! Analytics API configuration

use std::time::Duration;

use crate::client::Weight;

pub const DEFAULT_BASE_URL: &str = "https://api.vybenetwork.xyz";

/// Analytics API configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Sent as `X-API-KEY`
    pub api_key: Option<String>,

    /// Timeout for small lookups (token info, NFT portfolio, portfolio parts)
    pub light_timeout: Duration,

    /// Timeout for ordinary list endpoints
    pub standard_timeout: Duration,

    /// Timeout for time series and PnL
    pub heavy_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            light_timeout: Duration::from_secs(20),
            standard_timeout: Duration::from_secs(250),
            heavy_timeout: Duration::from_secs(350),
        }
    }
}

impl ApiConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Timeouts are reordered if needed so a
    /// heavier call never gets less time than a lighter one.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let secs = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .map_or(fallback, Duration::from_secs)
        };

        let base_url = lookup("VYBE_API_URL")
            .filter(|v| !v.is_empty())
            .map_or(defaults.base_url, |v| v.trim_end_matches('/').to_string());
        let api_key = lookup("VYBE_API_KEY").filter(|v| !v.is_empty());

        let mut timeouts = [
            secs("VYBE_TIMEOUT_LIGHT_SECS", defaults.light_timeout),
            secs("VYBE_TIMEOUT_STANDARD_SECS", defaults.standard_timeout),
            secs("VYBE_TIMEOUT_HEAVY_SECS", defaults.heavy_timeout),
        ];
        timeouts.sort();

        Self {
            base_url,
            api_key,
            light_timeout: timeouts[0],
            standard_timeout: timeouts[1],
            heavy_timeout: timeouts[2],
        }
    }

    pub fn timeout(&self, weight: Weight) -> Duration {
        match weight {
            Weight::Light => self.light_timeout,
            Weight::Standard => self.standard_timeout,
            Weight::Heavy => self.heavy_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts_grow_with_weight() {
        let config = ApiConfig::default();
        assert!(config.timeout(Weight::Light) < config.timeout(Weight::Standard));
        assert!(config.timeout(Weight::Standard) < config.timeout(Weight::Heavy));
    }

    #[test]
    fn test_from_lookup() {
        let config = ApiConfig::from_lookup(|key| match key {
            "VYBE_API_URL" => Some("http://localhost:9000/".into()),
            "VYBE_API_KEY" => Some("secret".into()),
            "VYBE_TIMEOUT_LIGHT_SECS" => Some("5".into()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.light_timeout, Duration::from_secs(5));
        assert_eq!(config.heavy_timeout, Duration::from_secs(350));
    }

    #[test]
    fn test_misordered_timeouts_are_sorted() {
        let config = ApiConfig::from_lookup(|key| match key {
            "VYBE_TIMEOUT_LIGHT_SECS" => Some("900".into()),
            _ => None,
        });
        assert_eq!(config.light_timeout, Duration::from_secs(250));
        assert_eq!(config.heavy_timeout, Duration::from_secs(900));
    }
}
