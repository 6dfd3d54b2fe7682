//! Chart document decoding.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;
use stocksync_types::{PriceRow, RowTimestamp};
use thiserror::Error;

/// Errors that can occur while decoding a chart document.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The body is not a chart document.
    #[error("Invalid chart document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider reported an error for the symbol.
    #[error("{code}: {description}")]
    Api {
        /// Provider error code (e.g., "Not Found").
        code: String,
        /// Human readable description.
        description: String,
    },

    /// Neither a result nor an error was returned.
    #[error("Chart document has no result")]
    NoResult,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i32,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
    #[serde(default)]
    adjclose: Vec<AdjCloseSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct AdjCloseSeries {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Decodes a chart document into price rows.
///
/// Rows keep the exchange-local offset reported in `meta.gmtoffset`. Null
/// cells stay `None`; the adjusted close falls back to the close when the
/// provider omits it (intraday intervals). A result without timestamps means
/// no bars in the requested window and yields an empty list.
///
/// # Errors
///
/// Returns an error if the body is malformed or carries a provider error.
pub fn parse_chart(body: &[u8]) -> Result<Vec<PriceRow>, ChartError> {
    let response: ChartResponse = serde_json::from_slice(body)?;

    if let Some(error) = response.chart.error {
        return Err(ChartError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or(ChartError::NoResult)?;

    let offset = FixedOffset::east_opt(result.meta.gmtoffset).unwrap_or_else(|| Utc.fix());
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|series| series.adjclose);

    let cell = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();

    let rows = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &secs)| {
            let ts = DateTime::from_timestamp(secs, 0)?.with_timezone(&offset);
            let close = cell(&quote.close, i);
            let adj_close = adjclose.as_deref().map_or(close, |adj| cell(adj, i));
            Some(PriceRow {
                timestamp: RowTimestamp::Zoned(ts),
                open: cell(&quote.open, i),
                high: cell(&quote.high, i),
                low: cell(&quote.low, i),
                close,
                adj_close,
                volume: cell(&quote.volume, i).map(|v| v as i64),
            })
        })
        .collect();

    Ok(rows)
}
