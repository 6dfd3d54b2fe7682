//! Bounded write buffer.

use stocksync_store::{Store, StoreError};
use stocksync_types::SyncPoint;

/// Accumulates points and writes them to a store in batches.
#[derive(Debug)]
pub struct WriteBuffer {
    points: Vec<SyncPoint>,
    capacity: usize,
    written: usize,
    flushes: usize,
}

impl WriteBuffer {
    /// Creates a buffer that writes whenever `capacity` points are pending.
    /// A zero capacity is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity.min(4096)),
            capacity,
            written: 0,
            flushes: 0,
        }
    }

    /// Adds a point, writing the buffer once it is full.
    ///
    /// # Errors
    ///
    /// Returns the store error of a triggered write. The pending points are
    /// discarded in that case.
    pub async fn push<S: Store + ?Sized>(&mut self, store: &S, point: SyncPoint) -> Result<(), StoreError> {
        self.points.push(point);
        if self.points.len() >= self.capacity {
            self.flush(store).await?;
        }
        Ok(())
    }

    /// Writes all pending points.
    ///
    /// # Errors
    ///
    /// Returns the store error of the write. The pending points are discarded
    /// in that case.
    pub async fn flush<S: Store + ?Sized>(&mut self, store: &S) -> Result<(), StoreError> {
        if self.points.is_empty() {
            return Ok(());
        }
        let points = std::mem::take(&mut self.points);
        store.write_points(&points).await?;
        self.written += points.len();
        self.flushes += 1;
        tracing::info!(points = points.len(), total = self.written, "flushed points to store");
        Ok(())
    }

    /// Returns the number of pending points.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of points written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Returns the number of store writes so far.
    #[must_use]
    pub const fn flushes(&self) -> usize {
        self.flushes
    }
}
