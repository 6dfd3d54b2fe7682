//! Yahoo Finance chart API implementation of [`FetchClient`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use stocksync_types::{Interval, Period, PriceRow};

use crate::{
    ChartClient, ClientConfig, FetchClient, FetchError, FetchOutcome,
    chart::parse_chart,
    url::{ChartRange, chart_url},
};

/// Message recorded for symbols the provider does not know.
const NOT_FOUND: &str = "No data found, symbol may be delisted";

/// Fetches each symbol's chart concurrently and gathers them into one outcome.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: ChartClient,
}

impl YahooClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: ChartClient::new(config)?,
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &ChartClient {
        &self.client
    }

    async fn fetch_all(
        &self,
        symbols: &[String],
        interval: Interval,
        range: ChartRange,
    ) -> FetchOutcome {
        let config = self.client.config();
        let client = &self.client;

        let results: Vec<(String, Result<Vec<PriceRow>, String>)> = stream::iter(symbols.iter().cloned())
            .map(|symbol: String| {
                let url = chart_url(&config.base_url, &symbol, interval, range);
                async move {
                    let result = fetch_symbol(client, &url).await;
                    (symbol, result)
                }
            })
            .buffer_unordered(config.concurrency.max(1))
            .collect()
            .await;

        let mut outcome = FetchOutcome::new();
        for (symbol, result) in results {
            match result {
                Ok(rows) if rows.is_empty() => {}
                Ok(rows) => outcome.insert_rows(symbol, rows),
                Err(message) => outcome.insert_error(symbol, message),
            }
        }

        tracing::debug!(
            %interval,
            symbols = symbols.len(),
            rows = outcome.row_count(),
            errors = outcome.errors.len(),
            "chart fetch finished"
        );
        outcome
    }
}

async fn fetch_symbol(client: &ChartClient, url: &str) -> Result<Vec<PriceRow>, String> {
    match client.get(url).await {
        Ok(Some(body)) => parse_chart(&body).map_err(|e| e.to_string()),
        Ok(None) => Err(NOT_FOUND.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[async_trait]
impl FetchClient for YahooClient {
    async fn fetch_range(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
        interval: Interval,
    ) -> Result<FetchOutcome, FetchError> {
        if symbols.is_empty() {
            return Ok(FetchOutcome::new());
        }
        Ok(self
            .fetch_all(symbols, interval, ChartRange::Between(start, stop))
            .await)
    }

    async fn fetch_period(
        &self,
        symbols: &[String],
        interval: Interval,
        period: Period,
    ) -> Result<FetchOutcome, FetchError> {
        if symbols.is_empty() {
            return Ok(FetchOutcome::new());
        }
        Ok(self.fetch_all(symbols, interval, ChartRange::Period(period)).await)
    }
}
