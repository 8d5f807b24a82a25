//! Analytics Data Provider
//!
//! Abstraction over the remote JSON API plus the endpoint catalogue.

mod http;
mod mock;

pub use http::HttpDataProvider;
pub use mock::MockDataProvider;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use vybe_core::params::{Resolution, SortCriteria, SortOrder, TimeRange, VolumeInterval};

use crate::error::Result;

/// How much data an endpoint returns; heavier calls get longer timeouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weight {
    Light,
    Standard,
    Heavy,
}

/// One concrete API request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Short name for logs
    pub name: &'static str,

    /// Path below the API root, starting with `/`
    pub path: String,

    pub query: Vec<(&'static str, String)>,
    pub weight: Weight,
}

impl Endpoint {
    fn new(name: &'static str, path: String, weight: Weight) -> Self {
        Self {
            name,
            path,
            query: Vec::new(),
            weight,
        }
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Path plus encoded query, as sent
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}?{}", self.path, query.join("&"))
    }

    pub fn collection_owners(collection: &str) -> Self {
        Self::new(
            "collection_owners",
            format!("/nft/collection-owners/{collection}"),
            Weight::Standard,
        )
    }

    pub fn program(program: &str) -> Self {
        Self::new("program", format!("/program/{program}"), Weight::Standard)
    }

    pub fn top_active_wallets(program: &str, days: u32, limit: u32) -> Self {
        Self::new(
            "top_active_wallets",
            format!("/program/{program}/active-users"),
            Weight::Standard,
        )
        .param("days", days)
        .param("limit", limit)
    }

    pub fn active_users_series(program: &str, range: TimeRange) -> Self {
        Self::new(
            "active_users_series",
            format!("/program/{program}/active-users-ts"),
            Weight::Heavy,
        )
        .param("range", range)
    }

    pub fn transactions_series(program: &str, range: TimeRange) -> Self {
        Self::new(
            "transactions_series",
            format!("/program/{program}/transactions-count-ts"),
            Weight::Heavy,
        )
        .param("range", range)
    }

    pub fn program_tvl(program: &str, resolution: Resolution) -> Self {
        Self::new("program_tvl", format!("/program/{program}/tvl"), Weight::Standard)
            .param("resolution", resolution)
    }

    pub fn nft_balance(wallet: &str) -> Self {
        Self::new("nft_balance", format!("/account/nft-balance/{wallet}"), Weight::Light)
    }

    pub fn wallet_pnl(wallet: &str, days: u32) -> Self {
        Self::new("wallet_pnl", format!("/account/pnl/{wallet}"), Weight::Heavy)
            .param("resolution", format!("{days}d"))
    }

    /// PnL probe used as a cheap liveness check
    pub fn wallet_pnl_probe(wallet: &str) -> Self {
        Self {
            weight: Weight::Light,
            ..Self::wallet_pnl(wallet, 1)
        }
    }

    pub fn token_balance(wallet: &str) -> Self {
        Self::new(
            "token_balance",
            format!("/account/token-balance/{wallet}"),
            Weight::Standard,
        )
    }

    /// Token balance total for the portfolio summary
    pub fn token_balance_total(wallet: &str) -> Self {
        Self {
            weight: Weight::Light,
            ..Self::token_balance(wallet)
        }
    }

    pub fn token_balance_series(wallet: &str, days: u32) -> Self {
        Self::new(
            "token_balance_series",
            format!("/account/token-balance-ts/{wallet}"),
            Weight::Heavy,
        )
        .param("days", days)
    }

    pub fn token(mint: &str) -> Self {
        Self::new("token", format!("/token/{mint}"), Weight::Light)
    }

    pub fn token_ohlcv(mint: &str, resolution: Resolution, start: i64, end: i64) -> Self {
        Self::new("token_ohlcv", format!("/price/{mint}/token-ohlcv"), Weight::Standard)
            .param("resolution", resolution)
            .param("timeStart", start)
            .param("timeEnd", end)
    }

    pub fn holders_series(mint: &str, start: i64, end: i64) -> Self {
        Self::new(
            "holders_series",
            format!("/token/{mint}/holders-ts"),
            Weight::Heavy,
        )
        .param("startTime", start)
        .param("endTime", end)
    }

    pub fn top_holders(mint: &str, limit: u64, sort: SortCriteria, order: SortOrder) -> Self {
        Self::new("top_holders", format!("/token/{mint}/top-holders"), Weight::Standard)
            .param("limit", limit)
            .param("sortBy", sort)
            .param("sortDirection", order.as_api())
    }

    pub fn transfer_volume(mint: &str, start: i64, end: i64, interval: VolumeInterval) -> Self {
        Self::new(
            "transfer_volume",
            format!("/token/{mint}/transfer-volume"),
            Weight::Heavy,
        )
        .param("startTime", start)
        .param("endTime", end)
        .param("interval", interval)
    }
}

/// Data provider trait (Strategy pattern)
///
/// Implementations perform exactly one request per call, bounded by the
/// endpoint's timeout, and never retry.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch the endpoint's JSON body
    async fn get_json(&self, endpoint: &Endpoint) -> Result<serde_json::Value>;

    /// Provider name
    fn name(&self) -> &str;
}

/// Fetch and decode into `T`; shape mismatches become `Malformed`
pub async fn fetch<T: DeserializeOwned>(provider: &dyn DataProvider, endpoint: &Endpoint) -> Result<T> {
    let body = provider.get_json(endpoint).await?;
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let ep = Endpoint::top_holders("MINT", 5, SortCriteria::ValueUsd, SortOrder::Desc);
        assert_eq!(
            ep.path_and_query(),
            "/token/MINT/top-holders?limit=5&sortBy=valueUsd&sortDirection=Desc"
        );

        let ep = Endpoint::wallet_pnl("W", 7);
        assert_eq!(ep.path_and_query(), "/account/pnl/W?resolution=7d");
        assert_eq!(ep.weight, Weight::Heavy);

        assert_eq!(Endpoint::token("M").path_and_query(), "/token/M");
        assert_eq!(
            Endpoint::active_users_series("P", TimeRange::hours(12)).path_and_query(),
            "/program/P/active-users-ts?range=12h"
        );
    }

    #[test]
    fn test_portfolio_parts_are_light() {
        assert_eq!(Endpoint::wallet_pnl_probe("W").weight, Weight::Light);
        assert_eq!(Endpoint::token_balance_total("W").weight, Weight::Light);
        assert_eq!(Endpoint::nft_balance("W").weight, Weight::Light);
        assert_eq!(Endpoint::token_balance_total("W").path, Endpoint::token_balance("W").path);
    }
}
