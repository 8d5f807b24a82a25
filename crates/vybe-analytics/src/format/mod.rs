//! Record Formatters
//!
//! Pure functions from API records to Markdown message bodies. Missing
//! fields render as [`NA`]; nothing here fails.

pub mod nft;
pub mod program;
pub mod token;
pub mod wallet;

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;

/// Placeholder for absent fields
pub const NA: &str = "N/A";

/// Rule under series listings
pub const RULE: &str = "──────────────────────────────";

/// Shorter rule used inside entries
pub const SHORT_RULE: &str = "────────────────────────────";

const EMOJI_NUMBERS: [&str; 10] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟"];

/// `1️⃣`..`🔟`, then `*11.*`
pub fn rank_marker(position: usize) -> String {
    position
        .checked_sub(1)
        .and_then(|i| EMOJI_NUMBERS.get(i))
        .map_or_else(|| format!("*{position}.*"), |e| (*e).to_string())
}

/// First six and last four characters
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

pub fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NA)
}

/// Insert `,` every three digits of the integer part of a plain number
fn group_digits(plain: &str) -> String {
    let (sign, unsigned) = plain.strip_prefix('-').map_or(("", plain), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned.split_once('.').map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `1234567` → `1,234,567`
pub fn thousands(value: i64) -> String {
    group_digits(&value.to_string())
}

/// Two decimals with grouping: `1234.5` → `1,234.50`
pub fn thousands_f2(value: f64) -> String {
    group_digits(&format!("{value:.2}"))
}

/// Exact USD amount, two decimals with grouping
pub fn usd(value: Decimal) -> String {
    group_digits(&format!("{:.2}", value.round_dp(2)))
}

/// Two decimals, no grouping
pub fn usd_plain(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// `1234567.0` → `1.23M`
pub fn human(value: f64) -> String {
    let mut num = value;
    for unit in ["", "K", "M", "B", "T"] {
        if num.abs() < 1000.0 {
            return format!("{num:.2}{unit}");
        }
        num /= 1000.0;
    }
    format!("{num:.2}P")
}

/// Format a Unix timestamp in UTC
pub fn utc(timestamp: Option<i64>, pattern: &str) -> String {
    timestamp
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map_or_else(|| NA.to_string(), |dt| dt.format(pattern).to_string())
}

/// Reformat an ISO-8601 timestamp; unparseable text is returned as-is
pub fn iso(text: Option<&str>, pattern: &str) -> String {
    let Some(text) = text else {
        return NA.to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.format(pattern).to_string();
    }
    NaiveDateTime::parse_from_str(text.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
        .map_or_else(|_| text.to_string(), |dt| dt.format(pattern).to_string())
}

pub const DATE: &str = "%Y-%m-%d";
pub const DATE_MINUTE: &str = "%Y-%m-%d %H:%M";
pub const DATE_SECOND: &str = "%Y-%m-%d %H:%M:%S";

/// `✅` or `❌`
pub fn check(flag: bool) -> &'static str {
    if flag { "✅" } else { "❌" }
}
