//! Program overview, top wallets, and program time series

use vybe_core::params::{RangeUnit, Resolution, TimeRange};

use super::{
    DATE, DATE_MINUTE, DATE_SECOND, NA, RULE, iso, or_na, rank_marker, short_address, thousands,
    thousands_f2, utc,
};
use crate::model::{ActiveWallet, DauPoint, ProgramInfo, TvlPoint, TxPoint};

fn count_or_na(value: Option<i64>) -> String {
    value.map_or_else(|| NA.to_string(), thousands)
}

pub fn details(info: &ProgramInfo) -> String {
    let labels = if info.labels.is_empty() {
        "None".to_string()
    } else {
        info.labels.join(", ")
    };
    let description = info
        .program_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NA);

    format!(
        "📌 *Program Overview*\n\n\
         🏛️ *Entity:* {}\n\
         📛 *Name:* {}\n\
         🏷️ *Labels:* {labels}\n\n\
         📊 *Stats (24h)*\n\
         👥 Active Users: {}\n\
         🆕 New Users: {}\n\
         🔁 Transactions: {}\n\n\
         📖 *Description:*\n{description}",
        or_na(info.entity_name.as_deref()),
        or_na(info.friendly_name.as_deref()),
        count_or_na(info.dau),
        count_or_na(info.new_users_change_1d),
        count_or_na(info.transactions_1d),
    )
}

pub fn top_wallets(program: &str, days: u32, limit: u32, wallets: &[ActiveWallet]) -> String {
    let mut lines = vec![format!(
        "📊 *Top {limit} Active Wallets*\n🧾 *Program:* {program}\n📆 *Last {days} Days*"
    )];
    for (i, w) in wallets.iter().enumerate() {
        lines.push(format!(
            "{} {} — 🔁 *{}*",
            rank_marker(i + 1),
            w.wallet.as_deref().map_or_else(|| NA.to_string(), short_address),
            thousands(w.transactions.unwrap_or(0)),
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Series
// =============================================================================

fn activity_label_format(range: TimeRange) -> &'static str {
    match range.unit {
        RangeUnit::Hours => DATE_MINUTE,
        RangeUnit::Days => DATE,
    }
}

pub fn active_users(program: &str, range: TimeRange, points: &[DauPoint]) -> String {
    let pattern = activity_label_format(range);
    let mut lines = vec![format!("📊 *Active Users Over `{range}`*\n🧾 *Program:* {program}\n{RULE}")];
    lines.extend(
        points
            .iter()
            .map(|p| format!("🕒 {} → 👥 {}", utc(p.block_time, pattern), p.dau.unwrap_or(0))),
    );
    let total: i64 = points.iter().filter_map(|p| p.dau).sum();
    lines.push(RULE.to_string());
    lines.push(format!("✅ *Total Active Users:* {}", thousands(total)));
    lines.join("\n")
}

#[allow(clippy::cast_precision_loss)]
pub fn active_users_points(range: TimeRange, points: &[DauPoint]) -> Vec<(String, f64)> {
    let pattern = activity_label_format(range);
    points
        .iter()
        .map(|p| (utc(p.block_time, pattern), p.dau.unwrap_or(0) as f64))
        .collect()
}

pub fn transactions(program: &str, range: TimeRange, points: &[TxPoint]) -> String {
    let mut lines = vec![format!("📊 *Transactions Over `{range}`*\n🧾 *Program:* {program}\n{RULE}")];
    lines.extend(points.iter().map(|p| {
        format!(
            "🕒 {} → 🔁 {}",
            utc(p.block_time, DATE_SECOND),
            thousands(p.transactions_count.unwrap_or(0))
        )
    }));
    let total: i64 = points.iter().filter_map(|p| p.transactions_count).sum();
    lines.push(RULE.to_string());
    lines.push(format!("✅ *Total Transactions:* {}", thousands(total)));
    lines.join("\n")
}

#[allow(clippy::cast_precision_loss)]
pub fn transactions_points(points: &[TxPoint]) -> Vec<(String, f64)> {
    points
        .iter()
        .map(|p| (utc(p.block_time, DATE_MINUTE), p.transactions_count.unwrap_or(0) as f64))
        .collect()
}

pub fn tvl(program: &str, resolution: Resolution, points: &[TvlPoint]) -> String {
    let mut lines = vec![format!("📊 *TVL Data for* `{program}` ({resolution})"), RULE.to_string()];
    lines.extend(points.iter().map(|p| {
        format!(
            "🕒 {} → 💰 ${}",
            iso(p.time.as_deref(), DATE_SECOND),
            thousands_f2(p.tvl.unwrap_or(0.0))
        )
    }));
    lines.join("\n")
}

pub fn tvl_points(points: &[TvlPoint]) -> Vec<(String, f64)> {
    points
        .iter()
        .map(|p| (iso(p.time.as_deref(), DATE_SECOND), p.tvl.unwrap_or(0.0)))
        .collect()
}
