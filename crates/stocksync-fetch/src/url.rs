//! Chart API URL construction.

use chrono::{DateTime, Utc};
use stocksync_types::{Interval, Period};

/// Time selection of a chart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRange {
    /// Explicit `[start, stop)` window.
    Between(DateTime<Utc>, DateTime<Utc>),
    /// Provider lookback keyword.
    Period(Period),
}

/// Builds the chart URL for one symbol.
///
/// URL format: `{base}/v8/finance/chart/{SYMBOL}?interval={code}&{range}&...`
/// where `{range}` is either `period1={unix}&period2={unix}` or `range={period}`.
///
/// # Example
///
/// ```
/// use stocksync_fetch::url::{ChartRange, chart_url};
/// use stocksync_types::{Interval, Period};
///
/// let url = chart_url("https://query2.finance.yahoo.com", "aapl", Interval::Day1, ChartRange::Period(Period::Max));
/// assert_eq!(
///     url,
///     "https://query2.finance.yahoo.com/v8/finance/chart/AAPL?interval=1d&range=max&includePrePost=false&events=div%2Csplit&includeAdjustedClose=true"
/// );
/// ```
#[must_use]
pub fn chart_url(base: &str, symbol: &str, interval: Interval, range: ChartRange) -> String {
    let range = match range {
        ChartRange::Between(start, stop) => {
            format!("period1={}&period2={}", start.timestamp(), stop.timestamp())
        }
        ChartRange::Period(period) => format!("range={period}"),
    };
    format!(
        "{}/v8/finance/chart/{}?interval={}&{}&includePrePost=false&events=div%2Csplit&includeAdjustedClose=true",
        base.trim_end_matches('/'),
        urlencoding::encode(&symbol.to_uppercase()),
        interval,
        range
    )
}
