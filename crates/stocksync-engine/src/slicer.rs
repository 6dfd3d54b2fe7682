//! Splitting of long ranges into provider-sized windows.

use chrono::{DateTime, TimeDelta, Utc};
use stocksync_types::IntervalClass;

/// One fetch window and the floor its rows must exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceWindow {
    /// Inclusive window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
    /// Rows at or before this instant are discarded. `None` accepts all.
    pub floor: Option<DateTime<Utc>>,
}

/// Cuts `[start, stop]` into contiguous windows of `slice_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSlicer {
    width: TimeDelta,
    single_request_span: TimeDelta,
}

impl Default for RangeSlicer {
    fn default() -> Self {
        Self::new(6, TimeDelta::days(6))
    }
}

impl RangeSlicer {
    /// Creates a slicer. A zero `slice_days` is treated as one day.
    #[must_use]
    pub fn new(slice_days: u32, single_request_span: TimeDelta) -> Self {
        Self {
            width: TimeDelta::days(i64::from(slice_days.max(1))),
            single_request_span,
        }
    }

    /// Returns the window width.
    #[must_use]
    pub const fn width(&self) -> TimeDelta {
        self.width
    }

    /// Returns true if a request of `class` over `[start, stop]` exceeds what
    /// the provider serves in one call. Daily classes never need slicing.
    #[must_use]
    pub fn needs_slicing(&self, class: IntervalClass, start: DateTime<Utc>, stop: DateTime<Utc>) -> bool {
        class == IntervalClass::Intraday && stop - start > self.single_request_span
    }

    /// Slices `[start, stop]`.
    ///
    /// Windows start at `start`, are `slice_days` wide and the last one ends
    /// at `stop`. An empty or inverted range yields no windows. Every window
    /// shares the floor `start`, or no floor when `include_start` is set.
    #[must_use]
    pub fn slice(
        &self,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
        include_start: bool,
    ) -> Vec<SliceWindow> {
        let floor = (!include_start).then_some(start);
        let mut windows = Vec::new();
        let mut cursor = start;
        while cursor < stop {
            let end = (cursor + self.width).min(stop);
            windows.push(SliceWindow {
                start: cursor,
                end,
                floor,
            });
            cursor = end;
        }
        windows
    }
}
