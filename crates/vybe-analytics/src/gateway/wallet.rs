use rust_decimal::Decimal;
use tracing::{debug, warn};
use vybe_core::gateway::{BalanceHistoryQuery, PnlQuery};
use vybe_core::{ChartSpec, ErrorKind, FlowResult, messages};

use super::VybeGateway;
use crate::client::Endpoint;
use crate::format;
use crate::model::{BalancePoint, Envelope, NftPortfolio, Pnl, TokenBalances};

const WALLET_NOT_FOUND: &str = "❌ Wallet not found or has no trading data.";
const WALLET_NOT_FOUND_FOR_PORTFOLIO: &str = "❌ Wallet not found or has no portfolio activity.";
const NO_WALLET_TOKEN_DATA: &str = "❌ Wallet not found or has no token data.";
const NO_TOKEN_BALANCES: &str = "⚠️ This wallet has no token balances.";
const NO_TOKEN_BALANCE_HISTORY: &str = "⚠️ No token balance data found for this wallet.";

/// PnL windows the API serves
const PNL_DAYS: [u32; 3] = [1, 7, 30];

impl VybeGateway {
    pub(super) async fn pnl_summary(&self, query: &PnlQuery) -> FlowResult {
        if !PNL_DAYS.contains(&query.days) {
            return Self::invalid(messages::INVALID_TIMESPAN_1D_7D_30D);
        }
        let endpoint = Endpoint::wallet_pnl(&query.wallet, query.days);
        match self.get::<Pnl>(&endpoint).await {
            Ok(pnl) => FlowResult::TextOnly(format::wallet::pnl(&query.wallet, query.days, &pnl)),
            Err(e) => Self::failed(&endpoint, &e, WALLET_NOT_FOUND),
        }
    }

    /// Token value plus NFT value, gated on a PnL liveness probe.
    /// Either half failing counts as zero.
    pub(super) async fn wallet_portfolio(&self, wallet: &str) -> FlowResult {
        let probe = Endpoint::wallet_pnl_probe(wallet);
        match self.get::<Pnl>(&probe).await {
            Ok(pnl) if !pnl.is_empty() => {}
            Ok(_) => {
                debug!(wallet, "liveness probe returned no activity");
                return FlowResult::Failure(ErrorKind::NotFound, WALLET_NOT_FOUND_FOR_PORTFOLIO.into());
            }
            Err(e) => return Self::failed(&probe, &e, WALLET_NOT_FOUND_FOR_PORTFOLIO),
        }

        let tokens_endpoint = Endpoint::token_balance_total(wallet);
        let nfts_endpoint = Endpoint::nft_balance(wallet);
        let (tokens, nfts) = futures::join!(
            self.get::<TokenBalances>(&tokens_endpoint),
            self.get::<NftPortfolio>(&nfts_endpoint),
        );

        let token_usd = tokens
            .map(|t| t.total_token_value_usd.unwrap_or(Decimal::ZERO))
            .unwrap_or_else(|e| {
                warn!(wallet, error = %e, "token total unavailable, counting as zero");
                Decimal::ZERO
            });
        let nft_usd = nfts
            .map(|n| n.total_usd.unwrap_or(Decimal::ZERO))
            .unwrap_or_else(|e| {
                warn!(wallet, error = %e, "NFT total unavailable, counting as zero");
                Decimal::ZERO
            });

        FlowResult::TextOnly(format::wallet::portfolio_summary(wallet, token_usd, nft_usd))
    }

    pub(super) async fn token_holdings(&self, wallet: &str) -> FlowResult {
        let endpoint = Endpoint::token_balance(wallet);
        match self.get::<TokenBalances>(&endpoint).await {
            Ok(balances) if balances.data.is_empty() => Self::no_data(NO_TOKEN_BALANCES),
            Ok(balances) => FlowResult::TextOnly(format::wallet::token_summary(&balances)),
            Err(e) => Self::failed(&endpoint, &e, NO_WALLET_TOKEN_DATA),
        }
    }

    pub(super) async fn balance_series(&self, query: &BalanceHistoryQuery) -> FlowResult {
        if !(1..=30).contains(&query.days) {
            return Self::invalid(messages::INVALID_TIMESPAN_1D_30D);
        }
        let endpoint = Endpoint::token_balance_series(&query.wallet, query.days);
        let points = match self.get::<Envelope<BalancePoint>>(&endpoint).await {
            Ok(series) if series.data.is_empty() => return Self::no_data(NO_TOKEN_BALANCE_HISTORY),
            Ok(series) => series.data,
            Err(e) => return Self::failed(&endpoint, &e, NO_TOKEN_BALANCE_HISTORY),
        };

        let body = format::wallet::balance_history(&query.wallet, query.days, &points);
        let prefix: String = query.wallet.chars().take(6).collect();
        let spec = ChartSpec::bar(
            format!("Token Value Over Time • {prefix}..."),
            "Date",
            "Token Value (USD)",
        )
        .with_points(format::wallet::balance_points(&points));
        self.with_chart(body, spec, Some("📈 Token Balance Chart".to_string()))
            .await
    }
}
