//! Validated Parameters
//!
//! Typed values produced by the step validators and consumed by the
//! analytics gateway. Each type knows how to render itself for the remote
//! API and for user-facing text.

use serde::{Deserialize, Serialize};

/// A calendar date entered as `YYYY-MM-DD`, with its UTC midnight timestamp
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInput {
    /// The text as the user typed it
    pub text: String,

    /// Unix seconds at 00:00 UTC
    pub timestamp: i64,
}

/// Unit for simple look-back ranges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeUnit {
    Hours,
    Days,
}

impl RangeUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            RangeUnit::Hours => "h",
            RangeUnit::Days => "d",
        }
    }
}

/// Look-back range such as `12h` or `7d`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub amount: u32,
    pub unit: RangeUnit,
}

impl TimeRange {
    pub fn hours(amount: u32) -> Self {
        Self { amount, unit: RangeUnit::Hours }
    }

    pub fn days(amount: u32) -> Self {
        Self { amount, unit: RangeUnit::Days }
    }

    /// Whether the range spans at most `limit` of its own unit
    pub fn at_most(&self, unit: RangeUnit, limit: u32) -> bool {
        self.unit == unit && self.amount <= limit
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Unit for candle and series resolutions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl ResolutionUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            ResolutionUnit::Second => "s",
            ResolutionUnit::Minute => "m",
            ResolutionUnit::Hour => "h",
            ResolutionUnit::Day => "d",
            ResolutionUnit::Week => "w",
            ResolutionUnit::Month => "mo",
            ResolutionUnit::Year => "y",
        }
    }

    pub fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "s" => Some(ResolutionUnit::Second),
            "m" => Some(ResolutionUnit::Minute),
            "h" => Some(ResolutionUnit::Hour),
            "d" => Some(ResolutionUnit::Day),
            "w" => Some(ResolutionUnit::Week),
            "mo" => Some(ResolutionUnit::Month),
            "y" => Some(ResolutionUnit::Year),
            _ => None,
        }
    }
}

/// Resolution such as `1h`, `15m`, or `1mo`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub amount: u32,
    pub unit: ResolutionUnit,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Candle resolutions the OHLCV endpoint serves
pub const OHLCV_RESOLUTIONS: [&str; 14] = [
    "1s", "1m", "3m", "5m", "15m", "30m", "1h", "2h", "3h", "4h", "1d", "1w", "1mo", "1y",
];

impl Resolution {
    pub fn is_supported_for_ohlcv(&self) -> bool {
        let text = self.to_string();
        OHLCV_RESOLUTIONS.contains(&text.as_str())
    }
}

/// Field the top-holders endpoint can sort by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortCriteria {
    Rank,
    OwnerName,
    OwnerAddress,
    ValueUsd,
    Balance,
    PercentageOfSupplyHeld,
}

impl SortCriteria {
    pub const ALL: [SortCriteria; 6] = [
        SortCriteria::Rank,
        SortCriteria::OwnerName,
        SortCriteria::OwnerAddress,
        SortCriteria::ValueUsd,
        SortCriteria::Balance,
        SortCriteria::PercentageOfSupplyHeld,
    ];

    /// API field name (also the keyboard label)
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriteria::Rank => "rank",
            SortCriteria::OwnerName => "ownerName",
            SortCriteria::OwnerAddress => "ownerAddress",
            SortCriteria::ValueUsd => "valueUsd",
            SortCriteria::Balance => "balance",
            SortCriteria::PercentageOfSupplyHeld => "percentageOfSupplyHeld",
        }
    }
}

impl std::fmt::Display for SortCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Capitalized form expected by the `sortDirection` query parameter
    pub fn as_api(&self) -> &'static str {
        match self {
            SortOrder::Asc => "Asc",
            SortOrder::Desc => "Desc",
        }
    }
}

/// Bucket size for transfer-volume queries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeInterval {
    Hour,
    Day,
}

impl VolumeInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeInterval::Hour => "hour",
            VolumeInterval::Day => "day",
        }
    }
}

impl std::fmt::Display for VolumeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
