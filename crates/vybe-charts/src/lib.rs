//! # vybe-charts
//!
//! [`vybe_core::ChartRenderer`] backends.
//!
//! ## Backends
//!
//! - **QuickChart** (default): renders Chart.js configurations over HTTP,
//!   against quickchart.io or a self-hosted instance
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vybe_charts::QuickChartRenderer;
//!
//! let renderer = QuickChartRenderer::from_env()?;
//! let png = renderer.render(&spec).await?;
//! ```

pub mod chartjs;

#[cfg(feature = "quickchart")]
pub mod quickchart;

#[cfg(feature = "quickchart")]
pub use quickchart::{ChartConfig, QuickChartRenderer};

pub use vybe_core::{ChartKind, ChartRenderer, ChartSpec};
