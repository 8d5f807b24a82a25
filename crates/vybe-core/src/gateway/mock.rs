//! Mock Analytics Gateway
//!
//! For tests and offline demos. Records every call and answers with a
//! canned result, optionally overridden per analytic.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    ActivityQuery, AnalyticsGateway, BalanceHistoryQuery, FlowResult, HoldersQuery, OhlcvQuery,
    PnlQuery, TopHoldersQuery, TopWalletsQuery, TvlQuery, VolumeQuery,
};
use crate::error::ErrorKind;

/// Mock gateway with canned answers
#[derive(Default)]
pub struct MockGateway {
    overrides: Mutex<HashMap<&'static str, FlowResult>>,
    calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `analytic` with `result` from now on
    pub fn respond(&self, analytic: &'static str, result: FlowResult) {
        if let Ok(mut overrides) = self.overrides.lock() {
            overrides.insert(analytic, result);
        }
    }

    /// Every call so far, as `analytic(args)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn answer(&self, analytic: &'static str, args: String) -> FlowResult {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{analytic}({args})"));
        }
        self.overrides
            .lock()
            .ok()
            .and_then(|o| o.get(analytic).cloned())
            .unwrap_or_else(|| FlowResult::TextOnly(format!("{analytic}: {args}")))
    }
}

#[async_trait]
impl AnalyticsGateway for MockGateway {
    async fn collection_owners(&self, collection: &str) -> FlowResult {
        self.answer("collection_owners", collection.to_string())
    }

    async fn program_details(&self, program: &str) -> FlowResult {
        self.answer("program_details", program.to_string())
    }

    async fn top_wallets(&self, query: &TopWalletsQuery) -> FlowResult {
        self.answer("top_wallets", format!("{}, {}", query.program, query.days))
    }

    async fn wallet_nfts(&self, wallet: &str) -> FlowResult {
        self.answer("wallet_nfts", wallet.to_string())
    }

    async fn wallet_pnl(&self, query: &PnlQuery) -> FlowResult {
        self.answer("wallet_pnl", format!("{}, {}", query.wallet, query.days))
    }

    async fn portfolio_summary(&self, wallet: &str) -> FlowResult {
        self.answer("portfolio_summary", wallet.to_string())
    }

    async fn wallet_tokens(&self, wallet: &str) -> FlowResult {
        self.answer("wallet_tokens", wallet.to_string())
    }

    async fn token_info(&self, mint: &str) -> FlowResult {
        self.answer("token_info", mint.to_string())
    }

    async fn token_ohlcv(&self, query: &OhlcvQuery) -> FlowResult {
        self.answer(
            "token_ohlcv",
            format!(
                "{}, {}, {}, {}",
                query.mint, query.resolution, query.start.text, query.end.text
            ),
        )
    }

    async fn active_users(&self, query: &ActivityQuery) -> FlowResult {
        self.answer("active_users", format!("{}, {}", query.program, query.range))
    }

    async fn transactions(&self, query: &ActivityQuery) -> FlowResult {
        self.answer("transactions", format!("{}, {}", query.program, query.range))
    }

    async fn tvl(&self, query: &TvlQuery) -> FlowResult {
        self.answer("tvl", format!("{}, {}", query.program, query.resolution))
    }

    async fn daily_holders(&self, query: &HoldersQuery) -> FlowResult {
        if query.end.timestamp <= query.start.timestamp {
            return FlowResult::failure(ErrorKind::Validation);
        }
        self.answer(
            "daily_holders",
            format!("{}, {}, {}", query.mint, query.start.text, query.end.text),
        )
    }

    async fn top_holders(&self, query: &TopHoldersQuery) -> FlowResult {
        if query.limit == 0 {
            return FlowResult::failure(ErrorKind::Validation);
        }
        self.answer(
            "top_holders",
            format!(
                "{}, {}, {}, {}",
                query.mint,
                query.sort,
                query.order.as_str(),
                query.limit
            ),
        )
    }

    async fn transfer_volume(&self, query: &VolumeQuery) -> FlowResult {
        self.answer(
            "transfer_volume",
            format!(
                "{}, {}, {}, {}",
                query.mint, query.start.text, query.end.text, query.interval
            ),
        )
    }

    async fn balance_history(&self, query: &BalanceHistoryQuery) -> FlowResult {
        self.answer("balance_history", format!("{}, {}", query.wallet, query.days))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
