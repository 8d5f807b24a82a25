//! # vybe-analytics
//!
//! Vybe Network data access for the analytics bot: an HTTP client with
//! per-endpoint timeouts, lenient record models, Markdown formatters, and
//! [`VybeGateway`], the [`vybe_core::AnalyticsGateway`] implementation.
//!
//! ## Request path
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ VybeGateway  │──▶│ DataProvider │──▶│    model     │──▶│    format    │
//! │ (checks,     │   │ (HTTP/mock,  │   │ (lenient     │   │ (Markdown    │
//! │  charts)     │   │  timeouts)   │   │  decoding)   │   │  bodies)     │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Endpoint weights
//!
//! | Weight   | Default timeout | Used for                                  |
//! |----------|-----------------|-------------------------------------------|
//! | Light    | 20s             | token info, NFT portfolio, portfolio parts |
//! | Standard | 250s            | lists, program details, OHLCV, TVL        |
//! | Heavy    | 350s            | time series, PnL                          |

pub mod client;
pub mod config;
pub mod de;
pub mod error;
pub mod format;
pub mod gateway;
pub mod model;

pub use client::{DataProvider, Endpoint, HttpDataProvider, MockDataProvider, Weight};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use gateway::VybeGateway;
