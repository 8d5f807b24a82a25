//! Input Validators
//!
//! Pure, total functions over raw user text. None of them panic on any
//! input; they answer `bool` or `Option<T>` and leave messaging to the
//! caller. Digits are matched as ASCII `[0-9]` only.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::params::{
    DateInput, RangeUnit, Resolution, ResolutionUnit, SortCriteria, SortOrder, TimeRange,
    VolumeInterval,
};

static ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{42,46}$").expect("valid regex"));
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));
static RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)(h|d)$").expect("valid regex"));
static RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(mo|s|m|h|d|w|y)$").expect("valid regex"));
static TVL_RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(s|h|d|w)$").expect("valid regex"));
static POSITIVE_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// Wallet, program, mint, and collection addresses: ASCII alphanumeric, 42–46 long
pub fn is_valid_address(input: &str) -> bool {
    ADDRESS.is_match(input)
}

pub fn parse_address(input: &str) -> Option<String> {
    is_valid_address(input).then(|| input.to_string())
}

/// `YYYY-MM-DD` to the Unix timestamp of that day's 00:00 UTC
pub fn date_to_unix(input: &str) -> Option<i64> {
    if !DATE.is_match(input) {
        return None;
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

pub fn parse_date(input: &str) -> Option<DateInput> {
    date_to_unix(input).map(|timestamp| DateInput {
        text: input.to_string(),
        timestamp,
    })
}

/// Simple look-back range: digits followed by `h` or `d`
pub fn parse_range(input: &str) -> Option<TimeRange> {
    let caps = RANGE.captures(input)?;
    let amount = caps[1].parse().ok()?;
    let unit = match &caps[2] {
        "h" => RangeUnit::Hours,
        _ => RangeUnit::Days,
    };
    Some(TimeRange { amount, unit })
}

pub fn is_valid_range(input: &str) -> bool {
    parse_range(input).is_some()
}

fn resolution_from(re: &Regex, input: &str) -> Option<Resolution> {
    let caps = re.captures(input)?;
    let amount = caps[1].parse().ok()?;
    let unit = ResolutionUnit::from_suffix(&caps[2])?;
    Some(Resolution { amount, unit })
}

/// Digits followed by one of `s, m, h, d, w, mo, y`
pub fn parse_resolution(input: &str) -> Option<Resolution> {
    resolution_from(&RESOLUTION, input)
}

/// Candle resolution restricted to the fixed list the OHLCV endpoint serves
pub fn parse_ohlcv_resolution(input: &str) -> Option<Resolution> {
    parse_resolution(input).filter(|r| r.to_string() == input && r.is_supported_for_ohlcv())
}

/// TVL series resolution: digits followed by `s, h, d` or `w`
pub fn parse_tvl_resolution(input: &str) -> Option<Resolution> {
    resolution_from(&TVL_RESOLUTION, input)
}

fn parse_u64(input: &str) -> Option<u64> {
    if !POSITIVE_INT.is_match(input) {
        return None;
    }
    input.parse().ok()
}

/// Day counts between 1 and 30 inclusive
pub fn parse_days(input: &str) -> Option<u32> {
    parse_u64(input)
        .filter(|d| (1..=30).contains(d))
        .and_then(|d| u32::try_from(d).ok())
}

/// PnL windows the API computes: 1, 7, or 30 days
pub fn parse_pnl_days(input: &str) -> Option<u32> {
    parse_u64(input)
        .filter(|d| matches!(d, 1 | 7 | 30))
        .and_then(|d| u32::try_from(d).ok())
}

/// A positive integer
pub fn parse_limit(input: &str) -> Option<u64> {
    parse_u64(input).filter(|n| *n > 0)
}

pub fn parse_sort_criteria(input: &str) -> Option<SortCriteria> {
    SortCriteria::ALL.into_iter().find(|c| c.as_str() == input)
}

pub fn parse_sort_order(input: &str) -> Option<SortOrder> {
    match input.to_lowercase().as_str() {
        "asc" => Some(SortOrder::Asc),
        "desc" => Some(SortOrder::Desc),
        _ => None,
    }
}

pub fn parse_interval(input: &str) -> Option<VolumeInterval> {
    match input.to_lowercase().as_str() {
        "hour" => Some(VolumeInterval::Hour),
        "day" => Some(VolumeInterval::Day),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_44: &str = "So11111111111111111111111111111111111111112a";

    #[test]
    fn test_address_length_bounds() {
        assert_eq!(ADDR_44.len(), 44);
        assert!(is_valid_address(ADDR_44));
        assert!(is_valid_address(&"a".repeat(42)));
        assert!(is_valid_address(&"Z9".repeat(23)));
        assert!(!is_valid_address(&"a".repeat(41)));
        assert!(!is_valid_address(&"a".repeat(47)));
    }

    #[test]
    fn test_address_rejects_non_alphanumeric() {
        let mut with_dash = "a".repeat(43);
        with_dash.push('-');
        assert!(!is_valid_address(&with_dash));
        let mut with_accent = "a".repeat(43);
        with_accent.push('é');
        assert!(!is_valid_address(&with_accent));
        assert!(!is_valid_address(&format!(" {}", "a".repeat(43))));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_date_to_unix() {
        assert_eq!(date_to_unix("2025-01-01"), Some(1_735_689_600));
        assert_eq!(date_to_unix("1970-01-01"), Some(0));
        assert_eq!(date_to_unix("2025-13-01"), None);
        assert_eq!(date_to_unix("2025-02-30"), None);
        assert_eq!(date_to_unix("01-01-2025"), None);
        assert_eq!(date_to_unix("2025-1-1"), None);
        assert_eq!(date_to_unix(""), None);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("12h"), Some(TimeRange::hours(12)));
        assert_eq!(parse_range("7d"), Some(TimeRange::days(7)));
        assert_eq!(parse_range("7w"), None);
        assert_eq!(parse_range("h"), None);
        assert_eq!(parse_range("99999999999h"), None);
        assert_eq!(parse_range("١h"), None);
    }

    #[test]
    fn test_parse_resolution_units() {
        assert_eq!(parse_resolution("1mo").map(|r| r.unit), Some(ResolutionUnit::Month));
        assert_eq!(parse_resolution("15m").map(|r| r.unit), Some(ResolutionUnit::Minute));
        assert_eq!(parse_resolution("2y").map(|r| r.to_string()), Some("2y".into()));
        assert_eq!(parse_resolution("1x"), None);
        assert_eq!(parse_tvl_resolution("1m"), None);
        assert!(parse_tvl_resolution("1w").is_some());
    }

    #[test]
    fn test_ohlcv_resolution_fixed_list() {
        assert!(parse_ohlcv_resolution("1mo").is_some());
        assert!(parse_ohlcv_resolution("4h").is_some());
        assert!(parse_ohlcv_resolution("7m").is_none());
        assert!(parse_ohlcv_resolution("01h").is_none());
    }

    #[test]
    fn test_numeric_validators() {
        assert_eq!(parse_days("1"), Some(1));
        assert_eq!(parse_days("30"), Some(30));
        assert_eq!(parse_days("0"), None);
        assert_eq!(parse_days("31"), None);
        assert_eq!(parse_days("-3"), None);
        assert_eq!(parse_pnl_days("7"), Some(7));
        assert_eq!(parse_pnl_days("14"), None);
        assert_eq!(parse_limit("10"), Some(10));
        assert_eq!(parse_limit("0"), None);
        assert_eq!(parse_limit("1.5"), None);
    }

    #[test]
    fn test_enum_validators() {
        assert_eq!(parse_sort_criteria("valueUsd"), Some(SortCriteria::ValueUsd));
        assert_eq!(parse_sort_criteria("valueusd"), None);
        assert_eq!(parse_sort_order("DESC"), Some(SortOrder::Desc));
        assert_eq!(parse_interval("Hour"), Some(VolumeInterval::Hour));
        assert_eq!(parse_interval("week"), None);
    }

    #[test]
    fn test_validators_are_total() {
        let huge = "9".repeat(100_000);
        let inputs = ["", " ", "🚀🚀🚀", "\u{0}", "٣٠", huge.as_str(), "2025-99-99"];
        for input in inputs {
            let _ = is_valid_address(input);
            let _ = parse_date(input);
            let _ = parse_range(input);
            let _ = parse_resolution(input);
            let _ = parse_ohlcv_resolution(input);
            let _ = parse_tvl_resolution(input);
            let _ = parse_days(input);
            let _ = parse_pnl_days(input);
            let _ = parse_limit(input);
            let _ = parse_sort_criteria(input);
            let _ = parse_sort_order(input);
            let _ = parse_interval(input);
        }
    }
}
