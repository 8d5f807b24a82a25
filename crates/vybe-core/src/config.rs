//! Dialog Configuration

use std::path::PathBuf;

use crate::chunk::DEFAULT_LIMIT;

/// Dialog configuration
#[derive(Clone, Debug)]
pub struct DialogConfig {
    /// Transport-safe message size, in chars
    pub message_limit: usize,

    /// Directory chart artifacts are written to
    pub chart_dir: PathBuf,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            message_limit: DEFAULT_LIMIT,
            chart_dir: std::env::temp_dir(),
        }
    }
}

impl DialogConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; unset or unparsable keys fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let message_limit = lookup("MESSAGE_LIMIT")
            .and_then(|v| v.parse().ok())
            .filter(|limit: &usize| *limit > 0)
            .unwrap_or(defaults.message_limit);
        let chart_dir = lookup("CHART_DIR")
            .filter(|v| !v.is_empty())
            .map_or(defaults.chart_dir, PathBuf::from);

        Self {
            message_limit,
            chart_dir,
        }
    }
}
