//! CLI command implementations.

pub(crate) mod health;
pub(crate) mod intervals;
pub(crate) mod plan;
pub(crate) mod run;
pub(crate) mod tickers;
