//! Vybe Analytics Gateway
//!
//! [`AnalyticsGateway`] over a [`DataProvider`] and a [`ChartRenderer`].
//! Each analytic performs its own business checks, fetches, formats, and
//! decides whether a chart goes with the text. Every failure is folded
//! into a [`FlowResult::Failure`] carrying a scrubbed message; raw detail
//! only reaches the log.

mod nft;
mod program;
mod token;
mod wallet;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::warn;
use vybe_core::gateway::{
    ActivityQuery, BalanceHistoryQuery, HoldersQuery, OhlcvQuery, PnlQuery, TopHoldersQuery,
    TopWalletsQuery, TvlQuery, VolumeQuery,
};
use vybe_core::{AnalyticsGateway, ChartImage, ChartRenderer, ChartSpec, ErrorKind, FlowResult, messages};

use crate::client::{DataProvider, Endpoint, fetch};
use crate::error::ApiError;

/// Shown instead of a generic not-found text for 403 responses
const FORBIDDEN: &str = "🚫 Forbidden (403): This resource is not accessible.";

pub struct VybeGateway {
    provider: Arc<dyn DataProvider>,
    renderer: Arc<dyn ChartRenderer>,
}

impl VybeGateway {
    pub fn new(provider: Arc<dyn DataProvider>, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self { provider, renderer }
    }

    /// Fetch and decode one endpoint
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        fetch(self.provider.as_ref(), endpoint).await
    }

    /// Log the raw error and turn it into a user-facing failure.
    /// `not_found` replaces the generic text for 400/404 answers.
    fn failed(endpoint: &Endpoint, err: &ApiError, not_found: &str) -> FlowResult {
        let kind = err.kind();
        warn!(endpoint = endpoint.name, %kind, error = %err, "analytics request failed");
        let message = match kind {
            ErrorKind::NotFound => not_found,
            ErrorKind::AccessDenied => FORBIDDEN,
            _ => err.user_message(),
        };
        FlowResult::Failure(kind, message.to_string())
    }

    fn no_data(message: &str) -> FlowResult {
        FlowResult::Failure(ErrorKind::NoData, message.to_string())
    }

    fn invalid(message: &str) -> FlowResult {
        FlowResult::Failure(ErrorKind::Validation, message.to_string())
    }

    /// Attach a rendered chart, or degrade to text plus a warning line
    async fn with_chart(&self, body: String, spec: ChartSpec, caption: Option<String>) -> FlowResult {
        match self.renderer.render(&spec).await {
            Ok(bytes) => FlowResult::TextAndImage(
                body,
                ChartImage {
                    bytes,
                    caption: Some(caption.unwrap_or_else(|| spec.title.clone())),
                },
            ),
            Err(e) => {
                warn!(renderer = self.renderer.name(), title = %spec.title, error = %e, "chart rendering failed");
                FlowResult::TextOnly(format!("{body}\n\n{}", messages::CHART_ERROR))
            }
        }
    }
}

#[async_trait]
impl AnalyticsGateway for VybeGateway {
    async fn collection_owners(&self, collection: &str) -> FlowResult {
        self.nft_collection_owners(collection).await
    }

    async fn program_details(&self, program: &str) -> FlowResult {
        self.program_overview(program).await
    }

    async fn top_wallets(&self, query: &TopWalletsQuery) -> FlowResult {
        self.program_top_wallets(query).await
    }

    async fn wallet_nfts(&self, wallet: &str) -> FlowResult {
        self.nft_portfolio(wallet).await
    }

    async fn wallet_pnl(&self, query: &PnlQuery) -> FlowResult {
        self.pnl_summary(query).await
    }

    async fn portfolio_summary(&self, wallet: &str) -> FlowResult {
        self.wallet_portfolio(wallet).await
    }

    async fn wallet_tokens(&self, wallet: &str) -> FlowResult {
        self.token_holdings(wallet).await
    }

    async fn token_info(&self, mint: &str) -> FlowResult {
        self.token_details(mint).await
    }

    async fn token_ohlcv(&self, query: &OhlcvQuery) -> FlowResult {
        self.candles(query).await
    }

    async fn active_users(&self, query: &ActivityQuery) -> FlowResult {
        self.program_active_users(query).await
    }

    async fn transactions(&self, query: &ActivityQuery) -> FlowResult {
        self.program_transactions(query).await
    }

    async fn tvl(&self, query: &TvlQuery) -> FlowResult {
        self.program_tvl(query).await
    }

    async fn daily_holders(&self, query: &HoldersQuery) -> FlowResult {
        self.holders_series(query).await
    }

    async fn top_holders(&self, query: &TopHoldersQuery) -> FlowResult {
        self.ranked_holders(query).await
    }

    async fn transfer_volume(&self, query: &VolumeQuery) -> FlowResult {
        self.volume_series(query).await
    }

    async fn balance_history(&self, query: &BalanceHistoryQuery) -> FlowResult {
        self.balance_series(query).await
    }

    fn name(&self) -> &str {
        "Vybe"
    }
}
