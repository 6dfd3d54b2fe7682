//! Ticker universe loading for the stocksync price synchronizer.
//!
//! The universe is a directory of CSV files, one per exchange. The file stem
//! (upper-cased) is the exchange code and the first column of every record
//! is a symbol.
//!
//! # Example
//!
//! ```no_run
//! use stocksync_tickers::TickerRepository;
//!
//! # async fn run() -> Result<(), stocksync_tickers::TickerError> {
//! let repo = TickerRepository::load_dir("tickers").await?;
//! for exchange in repo.exchanges() {
//!     println!("{exchange}: {} tickers", repo.tickers(exchange).len());
//! }
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stocksync/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use stocksync_types::Ticker;
use thiserror::Error;

/// Errors that can occur while loading tickers.
#[derive(Error, Debug)]
pub enum TickerError {
    /// The tickers path is not a directory.
    #[error("Tickers directory '{0}' does not exist")]
    NotADirectory(PathBuf),

    /// Failed to list the tickers directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to open a ticker file.
    #[error("Failed to open ticker file '{path}': {source}")]
    Open {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("Failed to parse ticker file '{path}': {source}")]
    Csv {
        /// The file that could not be parsed.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv_async::Error,
    },
}

/// Per-exchange ticker universe keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct TickerRepository {
    exchanges: BTreeMap<String, BTreeMap<String, Ticker>>,
}

impl TickerRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.csv` file in `dir`.
    ///
    /// A directory without CSV files yields an empty repository.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a directory or a file cannot be read
    /// or parsed.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self, TickerError> {
        let dir = dir.as_ref();
        if !tokio::fs::metadata(dir).await.is_ok_and(|m| m.is_dir()) {
            return Err(TickerError::NotADirectory(dir.to_path_buf()));
        }

        let read_dir_err = |source| TickerError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };
        let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_err)?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            tracing::error!(dir = %dir.display(), "found no *.csv files in the tickers directory");
        }

        let mut repo = Self::new();
        for file in &files {
            let Some(exchange) = file.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let count = repo.load_file(file, exchange).await?;
            tracing::debug!(file = %file.display(), exchange, count, "loaded ticker file");
        }

        Ok(repo)
    }

    /// Loads one symbol list into `exchange`, returning the number of rows read.
    async fn load_file(&mut self, path: &Path, exchange: &str) -> Result<usize, TickerError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| TickerError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let mut reader = csv_async::AsyncReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .create_reader(file);
        let mut records = reader.records();

        let mut count = 0;
        while let Some(record) = records.next().await {
            let record = record.map_err(|source| TickerError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            if let Some(symbol) = record.get(0).map(str::trim).filter(|s| !s.is_empty()) {
                self.add(Ticker::new(symbol, exchange));
                count += 1;
            }
        }

        Ok(count)
    }

    /// Adds a ticker, replacing an existing one with the same identity.
    pub fn add(&mut self, ticker: Ticker) {
        self.exchanges
            .entry(ticker.exchange().to_string())
            .or_default()
            .insert(ticker.symbol().to_string(), ticker);
    }

    /// Looks up a symbol on any exchange (case-insensitive).
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Ticker> {
        let symbol = symbol.to_uppercase();
        self.exchanges.values().find_map(|tickers| tickers.get(&symbol))
    }

    /// Removes a symbol from the first exchange listing it.
    ///
    /// Returns true if a ticker was removed.
    pub fn remove(&mut self, symbol: &str) -> bool {
        let symbol = symbol.to_uppercase();
        self.exchanges
            .values_mut()
            .any(|tickers| tickers.remove(&symbol).is_some())
    }

    /// Returns the exchange codes in sorted order.
    pub fn exchanges(&self) -> impl Iterator<Item = &str> {
        self.exchanges.keys().map(String::as_str)
    }

    /// Returns the tickers of an exchange sorted by symbol.
    ///
    /// Unknown exchanges yield an empty list.
    #[must_use]
    pub fn tickers(&self, exchange: &str) -> Vec<Ticker> {
        self.exchanges
            .get(&exchange.to_uppercase())
            .map(|tickers| tickers.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the total number of tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exchanges.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no tickers are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
