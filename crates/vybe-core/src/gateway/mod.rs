//! Analytics Gateway Abstraction
//!
//! One method per analytic. Parameters arrive already format-validated by
//! the step table; implementations only enforce business rules they alone
//! know (positive limits, end after start, supported resolutions) and fold
//! every external failure into a [`FlowResult::Failure`].

mod mock;

pub use mock::MockGateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::params::{
    DateInput, Resolution, SortCriteria, SortOrder, TimeRange, VolumeInterval,
};
use crate::reply::LinkButton;

/// PNG bytes plus an optional caption
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartImage {
    pub bytes: Vec<u8>,
    pub caption: Option<String>,
}

/// Outcome of a terminal action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowResult {
    TextOnly(String),
    TextAndImage(String, ChartImage),

    /// Text with an inline URL button (logos)
    TextWithLink(String, LinkButton),
    Failure(ErrorKind, String),
}

impl FlowResult {
    /// Failure with the kind's fallback text
    pub fn failure(kind: ErrorKind) -> Self {
        FlowResult::Failure(kind, crate::messages::failure(kind).to_string())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FlowResult::Failure(..))
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FlowResult::Failure(kind, _) => Some(*kind),
            _ => None,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopWalletsQuery {
    pub program: String,
    pub days: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlQuery {
    pub wallet: String,
    pub days: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcvQuery {
    pub mint: String,
    pub resolution: Resolution,
    pub start: DateInput,
    pub end: DateInput,
}

/// Program activity over a look-back range
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityQuery {
    pub program: String,
    pub range: TimeRange,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TvlQuery {
    pub program: String,
    pub resolution: Resolution,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldersQuery {
    pub mint: String,
    pub start: DateInput,
    pub end: DateInput,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopHoldersQuery {
    pub mint: String,
    pub sort: SortCriteria,
    pub order: SortOrder,
    pub limit: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeQuery {
    pub mint: String,
    pub start: DateInput,
    pub end: DateInput,
    pub interval: VolumeInterval,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceHistoryQuery {
    pub wallet: String,
    pub days: u32,
}

/// Analytics gateway trait (Strategy pattern)
///
/// Implement this per data source. Methods never error: every outcome,
/// including failure, is a [`FlowResult`].
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// Top 10 owners of an NFT collection
    async fn collection_owners(&self, collection: &str) -> FlowResult;

    /// Program overview with a logo link when available
    async fn program_details(&self, program: &str) -> FlowResult;

    async fn top_wallets(&self, query: &TopWalletsQuery) -> FlowResult;

    async fn wallet_nfts(&self, wallet: &str) -> FlowResult;

    async fn wallet_pnl(&self, query: &PnlQuery) -> FlowResult;

    /// Token value plus NFT value, gated on a PnL liveness check
    async fn portfolio_summary(&self, wallet: &str) -> FlowResult;

    async fn wallet_tokens(&self, wallet: &str) -> FlowResult;

    async fn token_info(&self, mint: &str) -> FlowResult;

    async fn token_ohlcv(&self, query: &OhlcvQuery) -> FlowResult;

    async fn active_users(&self, query: &ActivityQuery) -> FlowResult;

    async fn transactions(&self, query: &ActivityQuery) -> FlowResult;

    async fn tvl(&self, query: &TvlQuery) -> FlowResult;

    async fn daily_holders(&self, query: &HoldersQuery) -> FlowResult;

    async fn top_holders(&self, query: &TopHoldersQuery) -> FlowResult;

    async fn transfer_volume(&self, query: &VolumeQuery) -> FlowResult;

    async fn balance_history(&self, query: &BalanceHistoryQuery) -> FlowResult;

    /// Gateway name
    fn name(&self) -> &str;
}
