//! API Records
//!
//! Response shapes of the analytics API. Every field is optional and
//! leniently typed (see [`crate::de`]); formatters substitute placeholders.
//! USD holdings use `rust_decimal`; market statistics stay `f64`.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::de;

/// `{"data": [...]}` wrapper used by list endpoints
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "de::list")]
    pub data: Vec<T>,
}

// =============================================================================
// NFT
// =============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOwner {
    #[serde(default, deserialize_with = "de::text")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "de::integer")]
    pub amount: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftPortfolio {
    #[serde(default, deserialize_with = "de::text")]
    pub owner_address: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub total_sol: Option<f64>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub total_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "de::integer")]
    pub total_nft_collection_count: Option<i64>,
    #[serde(default, deserialize_with = "de::list")]
    pub data: Vec<NftCollection>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftCollection {
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub collection_address: Option<String>,
    #[serde(default, deserialize_with = "de::integer")]
    pub total_items: Option<i64>,
    #[serde(default, deserialize_with = "de::number")]
    pub value_sol: Option<f64>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub value_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "de::number")]
    pub price_sol: Option<f64>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub price_usd: Option<Decimal>,
}

// =============================================================================
// Programs
// =============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInfo {
    #[serde(default, deserialize_with = "de::text")]
    pub friendly_name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub entity_name: Option<String>,
    #[serde(default, deserialize_with = "de::integer")]
    pub dau: Option<i64>,
    #[serde(default, rename = "newUsersChange1d", deserialize_with = "de::integer")]
    pub new_users_change_1d: Option<i64>,
    #[serde(default, rename = "transactions1d", deserialize_with = "de::integer")]
    pub transactions_1d: Option<i64>,
    #[serde(default, deserialize_with = "de::list")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub program_description: Option<String>,
}

impl ProgramInfo {
    /// First non-empty of friendly name, name, entity name
    pub fn display_name(&self) -> Option<&str> {
        [&self.friendly_name, &self.name, &self.entity_name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .find(|n| !n.is_empty())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWallet {
    #[serde(default, deserialize_with = "de::text")]
    pub wallet: Option<String>,
    #[serde(default, deserialize_with = "de::integer")]
    pub transactions: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DauPoint {
    #[serde(default, deserialize_with = "de::integer")]
    pub block_time: Option<i64>,
    #[serde(default, deserialize_with = "de::integer")]
    pub dau: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxPoint {
    #[serde(default, deserialize_with = "de::integer")]
    pub block_time: Option<i64>,
    #[serde(default, deserialize_with = "de::integer")]
    pub transactions_count: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvlPoint {
    /// ISO-8601 timestamp
    #[serde(default, deserialize_with = "de::text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub tvl: Option<f64>,
}

// =============================================================================
// Wallets
// =============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pnl {
    #[serde(default)]
    pub summary: Option<PnlSummary>,
    #[serde(default, deserialize_with = "de::list")]
    pub token_metrics: Vec<TokenMetric>,
}

impl Pnl {
    /// No summary figures and no per-token metrics
    pub fn is_empty(&self) -> bool {
        self.summary.as_ref().is_none_or(PnlSummary::is_empty) && self.token_metrics.is_empty()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSummary {
    #[serde(default, deserialize_with = "de::number")]
    pub realized_pnl_usd: Option<f64>,
    #[serde(default, deserialize_with = "de::number")]
    pub unrealized_pnl_usd: Option<f64>,
    #[serde(default, deserialize_with = "de::number")]
    pub trades_volume_usd: Option<f64>,
    #[serde(default, deserialize_with = "de::integer")]
    pub trades_count: Option<i64>,
    #[serde(default, deserialize_with = "de::number")]
    pub average_trade_usd: Option<f64>,

    /// Fraction in `0..=1`
    #[serde(default, deserialize_with = "de::number")]
    pub win_rate: Option<f64>,
}

impl PnlSummary {
    pub fn is_empty(&self) -> bool {
        self.realized_pnl_usd.is_none()
            && self.unrealized_pnl_usd.is_none()
            && self.trades_volume_usd.is_none()
            && self.trades_count.is_none()
            && self.average_trade_usd.is_none()
            && self.win_rate.is_none()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetric {
    #[serde(default, deserialize_with = "de::text")]
    pub token_symbol: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub realized_pnl_usd: Option<f64>,
    #[serde(default, deserialize_with = "de::number")]
    pub unrealized_pnl_usd: Option<f64>,
    #[serde(default)]
    pub buys: Option<TradeSide>,
    #[serde(default)]
    pub sells: Option<TradeSide>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSide {
    #[serde(default, deserialize_with = "de::number")]
    pub volume_usd: Option<f64>,
    #[serde(default, deserialize_with = "de::integer")]
    pub transaction_count: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalances {
    #[serde(default, deserialize_with = "de::text")]
    pub owner_address: Option<String>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub total_token_value_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub staked_sol_balance_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "de::integer")]
    pub total_token_count: Option<i64>,
    #[serde(default, deserialize_with = "de::list")]
    pub data: Vec<TokenBalance>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    #[serde(default, deserialize_with = "de::text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub mint_address: Option<String>,
    #[serde(default, rename = "priceUsd1dChange", deserialize_with = "de::number")]
    pub price_usd_1d_change: Option<f64>,
    #[serde(default, rename = "valueUsd1dChange", deserialize_with = "de::decimal")]
    pub value_usd_1d_change: Option<Decimal>,
    #[serde(default, deserialize_with = "de::number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub value_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "de::flag")]
    pub verified: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    #[serde(default, deserialize_with = "de::integer")]
    pub block_time: Option<i64>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub token_value: Option<Decimal>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub stake_value: Option<Decimal>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub system_value: Option<Decimal>,
    #[serde(default, deserialize_with = "de::number")]
    pub stake_value_sol: Option<f64>,
}

// =============================================================================
// Tokens
// =============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    #[serde(default, deserialize_with = "de::text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub mint_address: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub price: Option<f64>,
    #[serde(default, rename = "price1d", deserialize_with = "de::number")]
    pub price_1d: Option<f64>,
    #[serde(default, rename = "price7d", deserialize_with = "de::number")]
    pub price_7d: Option<f64>,
    #[serde(default, deserialize_with = "de::integer")]
    pub decimal: Option<i64>,
    #[serde(default, deserialize_with = "de::flag")]
    pub verified: bool,
    #[serde(default, deserialize_with = "de::text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub subcategory: Option<String>,

    /// Unix seconds
    #[serde(default, rename = "updatetime", deserialize_with = "de::integer")]
    pub update_time: Option<i64>,
    #[serde(default, deserialize_with = "de::number")]
    pub current_supply: Option<f64>,
    #[serde(default, deserialize_with = "de::number")]
    pub market_cap: Option<f64>,
    #[serde(default, rename = "tokenAmountVolume24h", deserialize_with = "de::number")]
    pub token_amount_volume_24h: Option<f64>,
    #[serde(default, rename = "usdValueVolume24h", deserialize_with = "de::number")]
    pub usd_value_volume_24h: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub logo_url: Option<String>,
}

/// One OHLCV candle; values are shown exactly as the API sent them
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    #[serde(default, deserialize_with = "de::integer")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "de::text")]
    pub open: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub high: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub low: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub close: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub volume: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub volume_usd: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub count: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldersPoint {
    #[serde(default, deserialize_with = "de::integer")]
    pub holders_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "de::integer")]
    pub n_holders: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopHolder {
    #[serde(default, deserialize_with = "de::text")]
    pub rank: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub owner_address: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub balance: Option<String>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub value_usd: Option<Decimal>,

    /// Fraction in `0..=1`
    #[serde(default, deserialize_with = "de::number")]
    pub percentage_of_supply_held: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub token_symbol: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    #[serde(default, deserialize_with = "de::integer")]
    pub time_bucket_start: Option<i64>,
    #[serde(default, deserialize_with = "de::number")]
    pub volume: Option<f64>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_program_display_name_fallbacks() {
        let info: ProgramInfo = serde_json::from_value(json!({
            "friendlyName": "", "name": null, "entityName": "Orca"
        }))
        .unwrap();
        assert_eq!(info.display_name(), Some("Orca"));

        let none: ProgramInfo = serde_json::from_value(json!({})).unwrap();
        assert_eq!(none.display_name(), None);
    }

    #[test]
    fn test_pnl_emptiness() {
        let empty: Pnl = serde_json::from_value(json!({"summary": {}, "tokenMetrics": []})).unwrap();
        assert!(empty.is_empty());

        let null: Pnl = serde_json::from_value(json!({"summary": null})).unwrap();
        assert!(null.is_empty());

        let active: Pnl = serde_json::from_value(json!({"summary": {"tradesCount": 3}})).unwrap();
        assert!(!active.is_empty());
    }

    #[test]
    fn test_token_balances_decode() {
        let balances: TokenBalances = serde_json::from_value(json!({
            "ownerAddress": "W",
            "totalTokenValueUsd": "1234.5",
            "totalTokenCount": 2,
            "data": [
                {"symbol": "SOL", "valueUsd": 100.25, "valueUsd1dChange": -3, "verified": true},
                {"symbol": "BONK", "amount": "1000000"}
            ]
        }))
        .unwrap();
        assert_eq!(balances.total_token_value_usd, Some(dec!(1234.5)));
        assert_eq!(balances.data.len(), 2);
        assert!(balances.data[0].verified);
        assert_eq!(balances.data[0].value_usd_1d_change, Some(dec!(-3)));
        assert_eq!(balances.data[1].amount, Some(1_000_000.0));
        assert!(!balances.data[1].verified);
    }

    #[test]
    fn test_envelope_null_data() {
        let env: Envelope<DauPoint> = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(env.data.is_empty());
    }
}
