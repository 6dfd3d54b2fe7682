//! Ticker definitions.

use serde::{Deserialize, Serialize};

/// A symbol listed on an exchange.
///
/// Both parts are stored upper-cased; identity is `(exchange, symbol)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticker {
    /// Exchange code (e.g., "NASDAQ").
    exchange: String,
    /// Provider symbol (e.g., "AAPL").
    symbol: String,
}

impl Ticker {
    /// Creates a new ticker, upper-casing symbol and exchange.
    #[must_use]
    pub fn new(symbol: impl AsRef<str>, exchange: impl AsRef<str>) -> Self {
        Self {
            exchange: exchange.as_ref().trim().to_uppercase(),
            symbol: symbol.as_ref().trim().to_uppercase(),
        }
    }

    /// Returns the provider symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the exchange code.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.exchange, self.symbol)
    }
}
