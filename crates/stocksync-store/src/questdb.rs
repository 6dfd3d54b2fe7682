//! QuestDB store over its HTTP interfaces.
//!
//! Queries go through the REST endpoint (`GET /exec?query=`), writes through
//! the line-protocol endpoint (`POST /write?precision=n`) and liveness through
//! the monitoring server (`GET /status`).

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use stocksync_types::{Interval, SyncPoint};

use crate::{Store, StoreError, line::encode_points};

/// Connection settings for [`QuestDbStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Host name or address.
    pub host: String,
    /// REST and line-protocol HTTP port.
    pub http_port: u16,
    /// Monitoring server port.
    pub monitoring_port: u16,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            http_port: 9000,
            monitoring_port: 9003,
            timeout: Duration::from_secs(60),
        }
    }
}

impl StoreConfig {
    fn http_base(&self) -> String {
        format!("http://{}:{}", self.host, self.http_port)
    }

    fn status_url(&self) -> String {
        format!("http://{}:{}/status", self.host, self.monitoring_port)
    }
}

#[derive(Debug, Deserialize)]
struct ExecResponse {
    #[serde(default)]
    dataset: Vec<Vec<Value>>,
    #[serde(default)]
    error: Option<String>,
}

/// Decodes an `/exec` response body into its dataset rows.
fn decode_exec(query: &str, body: &[u8]) -> Result<Vec<Vec<Value>>, StoreError> {
    let response: ExecResponse =
        serde_json::from_slice(body).map_err(|e| StoreError::Decode(e.to_string()))?;
    if let Some(message) = response.error {
        return Err(StoreError::Query {
            query: query.to_string(),
            message,
        });
    }
    Ok(response.dataset)
}

fn string_cell<'a>(row: &'a [Value], index: usize) -> Result<&'a str, StoreError> {
    row.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode(format!("expected string in column {index}: {row:?}")))
}

/// Quotes a string literal for SQL.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn create_table_sql(interval: Interval) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS '{}' (\
         exchange SYMBOL, ticker SYMBOL, \
         open DOUBLE, high DOUBLE, low DOUBLE, close DOUBLE, adj_close DOUBLE, \
         volume LONG, timestamp TIMESTAMP\
         ), INDEX(ticker) TIMESTAMP(timestamp) PARTITION BY {} \
         WAL DEDUP UPSERT KEYS(timestamp, exchange, ticker);",
        interval.table_name(),
        interval.partition_by()
    )
}

fn existing_tickers_sql(interval: Interval, exchange: &str) -> String {
    format!(
        "SELECT DISTINCT ticker FROM '{}' WHERE exchange = {};",
        interval.table_name(),
        quote(exchange)
    )
}

fn last_entries_sql(interval: Interval) -> String {
    format!(
        "SELECT ticker, timestamp FROM '{}' LATEST ON timestamp PARTITION BY ticker;",
        interval.table_name()
    )
}

/// [`Store`] backed by a QuestDB server.
#[derive(Debug, Clone)]
pub struct QuestDbStore {
    client: Client,
    config: StoreConfig,
}

impl QuestDbStore {
    /// Creates a store for the given server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Runs one SQL statement and returns its dataset rows.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// query rejected by the server.
    pub async fn exec(&self, query: &str) -> Result<Vec<Vec<Value>>, StoreError> {
        tracing::debug!(query, "exec");
        let response = self
            .client
            .get(format!("{}/exec", self.config.http_base()))
            .query(&[("query", query)])
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // Rejected queries come back as 400 with an `error` field.
            if let Err(e @ StoreError::Query { .. }) = decode_exec(query, &body) {
                return Err(e);
            }
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        decode_exec(query, &body)
    }

    /// Returns true if the monitoring server reports the instance healthy.
    pub async fn health_check(&self) -> bool {
        match self.client.get(self.config.status_url()).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    /// Polls [`Self::health_check`] up to `retries` times, `delay` apart.
    pub async fn wait_until_healthy(&self, retries: u32, delay: Duration) -> bool {
        for attempt in 1..=retries {
            if self.health_check().await {
                return true;
            }
            tracing::info!(attempt, retries, host = %self.config.host, "store not healthy yet");
            if attempt < retries {
                tokio::time::sleep(delay).await;
            }
        }
        false
    }
}

#[async_trait]
impl Store for QuestDbStore {
    async fn ensure_table(&self, interval: Interval) -> Result<(), StoreError> {
        self.exec(&create_table_sql(interval)).await.map(|_| ())
    }

    async fn existing_tickers(
        &self,
        interval: Interval,
        exchange: &str,
    ) -> Result<BTreeSet<String>, StoreError> {
        self.exec(&existing_tickers_sql(interval, exchange))
            .await?
            .iter()
            .map(|row| string_cell(row, 0).map(str::to_string))
            .collect()
    }

    async fn last_entry_dates(
        &self,
        interval: Interval,
    ) -> Result<HashMap<String, DateTime<Utc>>, StoreError> {
        self.exec(&last_entries_sql(interval))
            .await?
            .iter()
            .map(|row| {
                let ticker = string_cell(row, 0)?;
                let ts = string_cell(row, 1)?;
                let ts = DateTime::parse_from_rfc3339(ts)
                    .map_err(|e| StoreError::Decode(format!("bad timestamp '{ts}': {e}")))?;
                Ok((ticker.to_string(), ts.with_timezone(&Utc)))
            })
            .collect()
    }

    async fn write_points(&self, points: &[SyncPoint]) -> Result<(), StoreError> {
        if points.is_empty() {
            return Ok(());
        }
        let body = encode_points(points);
        let response = self
            .client
            .post(format!("{}/write", self.config.http_base()))
            .query(&[("precision", "n")])
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        tracing::debug!(points = points.len(), "wrote points");
        Ok(())
    }
}
