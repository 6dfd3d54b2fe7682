//! HTTP client for the chart API.

use bytes::Bytes;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;
use thiserror::Error;

/// Default chart API host.
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Configuration for the chart client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum concurrent symbol requests.
    pub concurrency: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Retries after a throttled, refused or failed request.
    pub max_retries: u32,
    /// Backoff window of the first retry (in milliseconds).
    pub base_delay_ms: u64,
    /// Largest backoff window, also the cap on a server `Retry-After` (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// Scheme and host of the chart API, without trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // The provider rate limits aggressively per IP
            concurrency: 8,
            timeout: Duration::from_secs(30),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("Mozilla/5.0 (compatible; stocksync/{})", env!("CARGO_PKG_VERSION")),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Errors that can occur during a single request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The chart API answered with a status that is not worth retrying, or
    /// kept answering with a transient one until retries ran out.
    #[error("chart API returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct ChartClient {
    client: Client,
    config: ClientConfig,
}

impl ChartClient {
    /// Creates a new chart client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches one chart document.
    ///
    /// Returns `Ok(None)` if the symbol is unknown to the provider (404).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries.
    pub async fn get(&self, url: &str) -> Result<Option<Bytes>, RequestError> {
        let mut attempt = 0;

        loop {
            let hint = match self.client.get(url).send().await {
                Ok(response) => match response.status() {
                    StatusCode::NOT_FOUND => return Ok(None),
                    status if status.is_success() => return Ok(Some(response.bytes().await?)),
                    status if is_transient(status) && attempt < self.config.max_retries => {
                        tracing::debug!(url, %status, attempt, "chart request refused, backing off");
                        retry_after(response.headers())
                    }
                    status => {
                        return Err(RequestError::Status {
                            status: status.as_u16(),
                        });
                    }
                },
                Err(e) if is_retryable(&e) && attempt < self.config.max_retries => {
                    tracing::debug!(url, error = %e, attempt, "chart request failed, backing off");
                    None
                }
                Err(e) => return Err(e.into()),
            };

            attempt += 1;
            let max = Duration::from_millis(self.config.max_delay_ms);
            let delay = hint.map_or_else(|| self.backoff_delay(url, attempt), |d| d.min(max));
            tokio::time::sleep(delay).await;
        }
    }

    /// Delay before retry `attempt` (1-based) of `url`.
    ///
    /// The window doubles per attempt up to `max_delay_ms`. The delay falls in
    /// the upper half of the window at an offset derived from the URL, so the
    /// symbols of one batch that were throttled together come back spread out
    /// instead of hitting the rate limiter again in lockstep.
    fn backoff_delay(&self, url: &str, attempt: u32) -> Duration {
        let window = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.saturating_sub(1).min(16))
            .min(self.config.max_delay_ms);
        let half = window / 2;

        let mut hasher = DefaultHasher::new();
        (url, attempt).hash(&mut hasher);
        let offset = hasher.finish() % (half + 1);

        Duration::from_millis((window - half + offset).max(MIN_DELAY_MS))
    }
}

/// Shortest pause between two attempts.
const MIN_DELAY_MS: u64 = 100;

/// Rate limiting (429) and the chart API's overloaded gateways (500, 502,
/// 503, 504) clear up on their own. Any other refusal repeats verbatim.
fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// `Retry-After` in delta-seconds form. The HTTP-date form is ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Timeouts and connection failures are worth another attempt; builder errors are not.
fn is_retryable(error: &reqwest::Error) -> bool {
    !error.is_builder() && (error.is_timeout() || error.is_connect() || error.is_request())
}
