//! Sampling interval catalog.
//!
//! The provider accepts a fixed vocabulary of interval codes. Each code maps
//! to exactly one [`IntervalClass`] and one sampling [`TimeDelta`]; the table
//! is fixed at build time.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::UnknownInterval;

/// Coarse class of an interval, which decides how much history the provider
/// serves and whether long ranges must be sliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalClass {
    /// Minute and hour bars. The provider only serves a short recent window.
    Intraday,
    /// Daily, weekly and monthly bars. Full history is available.
    Daily,
}

impl IntervalClass {
    /// Returns the class as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Intraday => "intraday",
            Self::Daily => "daily",
        }
    }
}

impl std::fmt::Display for IntervalClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sampling interval of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    /// 1-minute bars.
    Minute1,
    /// 2-minute bars.
    Minute2,
    /// 5-minute bars.
    Minute5,
    /// 15-minute bars.
    Minute15,
    /// 30-minute bars.
    Minute30,
    /// 60-minute bars.
    Minute60,
    /// 90-minute bars.
    Minute90,
    /// 1-hour bars.
    Hour1,
    /// Daily bars.
    Day1,
    /// 5-day bars.
    Day5,
    /// Weekly bars.
    Week1,
    /// Monthly bars.
    Month1,
    /// Quarterly bars.
    Month3,
}

impl Interval {
    /// Returns the provider code of this interval.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute2 => "2m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Minute60 => "60m",
            Self::Minute90 => "90m",
            Self::Hour1 => "1h",
            Self::Day1 => "1d",
            Self::Day5 => "5d",
            Self::Week1 => "1wk",
            Self::Month1 => "1mo",
            Self::Month3 => "3mo",
        }
    }

    /// Returns the class of this interval.
    #[must_use]
    pub const fn class(&self) -> IntervalClass {
        match self {
            Self::Minute1
            | Self::Minute2
            | Self::Minute5
            | Self::Minute15
            | Self::Minute30
            | Self::Minute60
            | Self::Minute90
            | Self::Hour1 => IntervalClass::Intraday,
            Self::Day1 | Self::Day5 | Self::Week1 | Self::Month1 | Self::Month3 => {
                IntervalClass::Daily
            }
        }
    }

    /// Returns true for intraday intervals.
    #[must_use]
    pub const fn is_intraday(&self) -> bool {
        matches!(self.class(), IntervalClass::Intraday)
    }

    /// Returns the length of one sampling period in seconds.
    ///
    /// Months are counted as 30 days.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        const MINUTE: i64 = 60;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;
        match self {
            Self::Minute1 => MINUTE,
            Self::Minute2 => 2 * MINUTE,
            Self::Minute5 => 5 * MINUTE,
            Self::Minute15 => 15 * MINUTE,
            Self::Minute30 => 30 * MINUTE,
            Self::Minute60 | Self::Hour1 => HOUR,
            Self::Minute90 => 90 * MINUTE,
            Self::Day1 => DAY,
            Self::Day5 => 5 * DAY,
            Self::Week1 => 7 * DAY,
            Self::Month1 => 30 * DAY,
            Self::Month3 => 90 * DAY,
        }
    }

    /// Returns the length of one sampling period.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(self.seconds())
    }

    /// Returns the store table holding this interval's series.
    #[must_use]
    pub fn table_name(&self) -> String {
        format!("interval_{}", self.as_str())
    }

    /// Returns the storage partition granularity for this interval.
    #[must_use]
    pub const fn partition_by(&self) -> &'static str {
        match self.class() {
            IntervalClass::Intraday => "MONTH",
            IntervalClass::Daily => "YEAR",
        }
    }

    /// Returns all intervals in the catalog.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minute1,
            Self::Minute2,
            Self::Minute5,
            Self::Minute15,
            Self::Minute30,
            Self::Minute60,
            Self::Minute90,
            Self::Hour1,
            Self::Day1,
            Self::Day5,
            Self::Week1,
            Self::Month1,
            Self::Month3,
        ]
    }

    /// Parses a comma-separated list of interval codes.
    ///
    /// Blank entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on the first unknown code.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, UnknownInterval> {
        list.split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| UnknownInterval(s.to_string()))
    }
}

impl TryFrom<String> for Interval {
    type Error = UnknownInterval;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.as_str().to_string()
    }
}

/// String-keyed lookups into the interval table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalCatalog;

impl IntervalCatalog {
    /// Resolves an interval code.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownInterval`] if the code is not in the catalog.
    pub fn lookup(code: &str) -> Result<Interval, UnknownInterval> {
        code.parse()
    }

    /// Returns the class of an interval code.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownInterval`] if the code is not in the catalog.
    pub fn classify(code: &str) -> Result<IntervalClass, UnknownInterval> {
        Self::lookup(code).map(|interval| interval.class())
    }

    /// Returns the sampling period of an interval code.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownInterval`] if the code is not in the catalog.
    pub fn duration(code: &str) -> Result<TimeDelta, UnknownInterval> {
        Self::lookup(code).map(|interval| interval.duration())
    }
}

/// Lookback keyword understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// All available history.
    Max,
    /// The last `n` days.
    Days(u32),
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Max => write!(f, "max"),
            Self::Days(n) => write!(f, "{n}d"),
        }
    }
}
