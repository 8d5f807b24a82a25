//! Token info, candles, holders, and transfer volume

use rust_decimal::Decimal;
use vybe_core::params::{DateInput, Resolution, SortCriteria, SortOrder, VolumeInterval};

use super::{
    DATE, DATE_MINUTE, DATE_SECOND, NA, SHORT_RULE, check, human, or_na, thousands, thousands_f2,
    usd_plain, utc,
};
use crate::model::{Candle, HoldersPoint, TokenDetails, TopHolder, VolumePoint};

/// Candles shown per OHLCV request
pub const MAX_CANDLES: usize = 10;

pub fn info(token: &TokenDetails) -> String {
    let subcategory = token
        .subcategory
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("—");
    let decimals = token.decimal.map_or_else(|| NA.to_string(), |d| d.to_string());

    format!(
        "📄 *Full Token Info*\n\
         🔘 *Symbol:* {}\n\
         🏷️ *Name:* {}\n\
         🔑 *Mint:* `{}`\n\n\
         💵 *Price Info*\n\
         💰 *Current Price:* ${:.4}\n\
         📅 *1d Ago:* ${:.4}\n\
         🗓️ *7d Ago:* ${:.4}\n\n\
         🔍 *Details*\n\
         🧬 *Decimals:* {decimals}\n\
         ✅ *Verified:* {}\n\
         📂 *Category:* {}\n\
         📁 *Subcategory:* {subcategory}\n\n\
         ⏱️ *Last Updated:*\n{}\n\n\
         📦 *Supply & Market*\n\
         📦 *Supply:* {:.4}\n\
         💰 *Market Cap:* ${}\n\n\
         📊 *24h Volume*\n\
         🔄 *Token:* {}\n\
         💸 *USD:* ${}",
        or_na(token.symbol.as_deref()),
        or_na(token.name.as_deref()),
        or_na(token.mint_address.as_deref()),
        token.price.unwrap_or(0.0),
        token.price_1d.unwrap_or(0.0),
        token.price_7d.unwrap_or(0.0),
        check(token.verified),
        or_na(token.category.as_deref()),
        utc(token.update_time, DATE_SECOND),
        token.current_supply.unwrap_or(0.0),
        human(token.market_cap.unwrap_or(0.0)),
        human(token.token_amount_volume_24h.unwrap_or(0.0)),
        human(token.usd_value_volume_24h.unwrap_or(0.0)),
    )
}

pub fn ohlcv(resolution: Resolution, start: &DateInput, end: &DateInput, candles: &[Candle]) -> String {
    let mut lines = vec![format!(
        "📈 *Token OHLCV Data* ({resolution} candles)\n🗓️ *Range:* {} → {}",
        start.text, end.text
    )];
    for c in candles.iter().take(MAX_CANDLES) {
        lines.push(format!(
            "\n🕒 *Time:* {}\n\
             🔓 Open: {}\n\
             📈 High: {}\n\
             📉 Low: {}\n\
             🔒 Close: {}\n\
             📦 Volume: {}\n\
             💵 Volume (USD): {}\n\
             🧾 Count: {}\n\
             {SHORT_RULE}",
            utc(c.time, DATE_SECOND),
            or_na(c.open.as_deref()),
            or_na(c.high.as_deref()),
            or_na(c.low.as_deref()),
            or_na(c.close.as_deref()),
            or_na(c.volume.as_deref()),
            or_na(c.volume_usd.as_deref()),
            or_na(c.count.as_deref()),
        ));
    }
    lines.join("\n")
}

pub fn daily_holders(mint: &str, start: &DateInput, end: &DateInput, points: &[HoldersPoint]) -> String {
    let mut lines = vec![
        format!(
            "📊 *Daily Holders Count*\n🔑 *Mint:* `{mint}`\n📆 *Range:* {} → {}",
            start.text, end.text
        ),
        String::new(),
    ];
    lines.extend(points.iter().map(|p| {
        format!(
            "🗓️ {} → 👥 {}",
            utc(p.holders_timestamp, DATE),
            thousands(p.n_holders.unwrap_or(0))
        )
    }));
    let latest = points.last().and_then(|p| p.n_holders).unwrap_or(0);
    lines.push(String::new());
    lines.push(format!("✅ *Latest Total Holders:* {}", thousands(latest)));
    lines.join("\n")
}

#[allow(clippy::cast_precision_loss)]
pub fn holders_points(points: &[HoldersPoint]) -> Vec<(String, f64)> {
    points
        .iter()
        .map(|p| (utc(p.holders_timestamp, DATE), p.n_holders.unwrap_or(0) as f64))
        .collect()
}

pub fn top_holders(limit: u64, sort: SortCriteria, order: SortOrder, holders: &[TopHolder]) -> String {
    let mut lines = vec![format!(
        "📋 *Top {limit} Token Holders* (Sorted by *{sort}*, `{}`):",
        order.as_str().to_uppercase()
    )];
    for h in holders {
        lines.push(format!(
            "\n🏅 *Rank:* {}\n\
             👤 *Owner:* {} (`{}`)\n\
             📦 *Balance:* {}\n\
             💵 *Value (USD):* ${}\n\
             📈 *Supply Held:* {:.2}%\n\
             🔘 *Token Symbol:* {}",
            or_na(h.rank.as_deref()),
            or_na(h.owner_name.as_deref()),
            or_na(h.owner_address.as_deref()),
            or_na(h.balance.as_deref()),
            usd_plain(h.value_usd.unwrap_or(Decimal::ZERO)),
            h.percentage_of_supply_held.unwrap_or(0.0) * 100.0,
            or_na(h.token_symbol.as_deref()),
        ));
    }
    lines.join("\n")
}

pub fn transfer_volume(
    mint: &str,
    start: &DateInput,
    end: &DateInput,
    interval: VolumeInterval,
    points: &[VolumePoint],
) -> String {
    let mut lines = vec![
        format!(
            "📋 *Transfer Volume Data* ({interval})\n🪙 *Mint:* {mint}\n📆 *Range:* {} ➡ {}\n{SHORT_RULE}",
            start.text, end.text
        ),
        String::new(),
    ];
    lines.extend(points.iter().map(|p| {
        format!(
            "🕒 {} → 📦 {}",
            utc(p.time_bucket_start, DATE_MINUTE),
            thousands_f2(p.volume.unwrap_or(0.0))
        )
    }));
    lines.push(SHORT_RULE.to_string());
    lines.join("\n")
}

pub fn volume_points(points: &[VolumePoint]) -> Vec<(String, f64)> {
    points
        .iter()
        .map(|p| (utc(p.time_bucket_start, DATE_MINUTE), p.volume.unwrap_or(0.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(text: &str, timestamp: i64) -> DateInput {
        DateInput {
            text: text.into(),
            timestamp,
        }
    }

    #[test]
    fn test_info_human_readable_market() {
        let token: TokenDetails = serde_json::from_value(json!({
            "symbol": "SOL", "name": "Wrapped SOL", "mintAddress": "So111",
            "price": 145.123456, "decimal": 9, "verified": true,
            "updatetime": 1_735_689_600, "marketCap": 70_000_000_000.0,
            "usdValueVolume24h": 1_500_000
        }))
        .unwrap();
        let text = info(&token);
        assert!(text.contains("💰 *Current Price:* $145.1235"));
        assert!(text.contains("🧬 *Decimals:* 9"));
        assert!(text.contains("✅ *Verified:* ✅"));
        assert!(text.contains("📁 *Subcategory:* —"));
        assert!(text.contains("⏱️ *Last Updated:*\n2025-01-01 00:00:00"));
        assert!(text.contains("💰 *Market Cap:* $70.00B"));
        assert!(text.contains("💸 *USD:* $1.50M"));
    }

    #[test]
    fn test_ohlcv_shows_first_ten_raw() {
        let candles: Vec<Candle> = (0..15)
            .map(|i| Candle {
                time: Some(1_735_689_600 + i * 86_400),
                open: Some("95.23".into()),
                ..Candle::default()
            })
            .collect();
        let res = Resolution {
            amount: 1,
            unit: vybe_core::params::ResolutionUnit::Day,
        };
        let text = ohlcv(res, &date("2025-01-01", 0), &date("2025-01-20", 1), &candles);
        assert!(text.starts_with("📈 *Token OHLCV Data* (1d candles)\n🗓️ *Range:* 2025-01-01 → 2025-01-20"));
        assert_eq!(text.matches("🔓 Open: 95.23").count(), MAX_CANDLES);
        assert!(text.contains("🧾 Count: N/A"));
    }

    #[test]
    fn test_daily_holders_latest_total() {
        let points = vec![
            HoldersPoint { holders_timestamp: Some(1_735_689_600), n_holders: Some(1000) },
            HoldersPoint { holders_timestamp: Some(1_735_776_000), n_holders: Some(1250) },
        ];
        let text = daily_holders("MINT", &date("2025-01-01", 0), &date("2025-01-03", 1), &points);
        assert!(text.contains("🗓️ 2025-01-02 → 👥 1,250"));
        assert!(text.ends_with("✅ *Latest Total Holders:* 1,250"));
    }

    #[test]
    fn test_top_holders_header_and_percent() {
        let holders: Vec<TopHolder> = serde_json::from_value(json!([
            {"rank": 1, "ownerName": "whale", "ownerAddress": "ADDR", "balance": "12500",
             "valueUsd": 450000, "percentageOfSupplyHeld": 0.0845, "tokenSymbol": "SOL"}
        ]))
        .unwrap();
        let text = top_holders(5, SortCriteria::Balance, SortOrder::Desc, &holders);
        assert!(text.starts_with("📋 *Top 5 Token Holders* (Sorted by *balance*, `DESC`):"));
        assert!(text.contains("🏅 *Rank:* 1\n👤 *Owner:* whale (`ADDR`)"));
        assert!(text.contains("💵 *Value (USD):* $450000.00"));
        assert!(text.contains("📈 *Supply Held:* 8.45%"));
    }

    #[test]
    fn test_transfer_volume_lines() {
        let points = vec![VolumePoint {
            time_bucket_start: Some(1_735_689_600),
            volume: Some(1_234_567.891),
        }];
        let text = transfer_volume(
            "MINT",
            &date("2025-01-01", 0),
            &date("2025-01-02", 1),
            VolumeInterval::Day,
            &points,
        );
        assert!(text.starts_with("📋 *Transfer Volume Data* (day)"));
        assert!(text.contains("🕒 2025-01-01 00:00 → 📦 1,234,567.89"));
        assert_eq!(volume_points(&points)[0].1, 1_234_567.891);
    }
}
