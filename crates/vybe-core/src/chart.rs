//! Chart Renderer Abstraction
//!
//! The gateway decides *whether* a chart accompanies a result; a
//! [`ChartRenderer`] turns the series into PNG bytes. Backends live in
//! `vybe-charts`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Bar or line, optionally filled under the line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line { fill: bool },
}

/// Everything a backend needs to draw one chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Ordered `(label, value)` pairs
    pub points: Vec<(String, f64)>,
}

impl ChartSpec {
    pub fn bar(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points: Vec::new(),
        }
    }

    pub fn line(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        fill: bool,
    ) -> Self {
        Self {
            kind: ChartKind::Line { fill },
            ..Self::bar(title, x_label, y_label)
        }
    }

    pub fn with_points(mut self, points: Vec<(String, f64)>) -> Self {
        self.points = points;
        self
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|(label, _)| label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, value)| *value)
    }
}

/// Turns a [`ChartSpec`] into a raster image.
///
/// Implementations must bound their own runtime and never retry.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Render to PNG bytes
    async fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>>;
}

pub mod mock {
    //! In-memory renderer for tests

    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ChartRenderer, ChartSpec};
    use crate::error::{BotError, Result};

    /// Returns a fixed byte string and records every spec it was asked for
    #[derive(Default)]
    pub struct MockChartRenderer {
        fail: bool,
        rendered: Mutex<Vec<ChartSpec>>,
    }

    impl MockChartRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// A renderer whose every call fails
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn rendered(&self) -> Vec<ChartSpec> {
            self.rendered
                .lock()
                .map(|specs| specs.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl ChartRenderer for MockChartRenderer {
        fn name(&self) -> &str {
            "mock"
        }

        async fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>> {
            if let Ok(mut rendered) = self.rendered.lock() {
                rendered.push(spec.clone());
            }
            if self.fail {
                return Err(BotError::ChartRender("mock renderer set to fail".into()));
            }
            Ok(b"\x89PNG mock".to_vec())
        }
    }
}
