//! Error types for stocksync.

use thiserror::Error;

/// Error returned when an interval code is not in the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "unknown interval '{0}', expected one of: 1m, 2m, 5m, 15m, 30m, 60m, 90m, 1h, 1d, 5d, 1wk, 1mo, 3mo"
)]
pub struct UnknownInterval(pub String);
