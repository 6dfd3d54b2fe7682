//! Conversion of fetched rows into storage points.

use chrono::{DateTime, Utc};
use stocksync_types::{Interval, PriceRow, SyncPoint, Ticker, VOLUME_CEILING};

/// Validates price rows and turns them into [`SyncPoint`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointBuilder {
    volume_ceiling: i64,
}

impl Default for PointBuilder {
    fn default() -> Self {
        Self::new(VOLUME_CEILING)
    }
}

impl PointBuilder {
    /// Creates a builder clamping volumes to `volume_ceiling`.
    #[must_use]
    pub const fn new(volume_ceiling: i64) -> Self {
        Self { volume_ceiling }
    }

    /// Returns the volume ceiling.
    #[must_use]
    pub const fn volume_ceiling(&self) -> i64 {
        self.volume_ceiling
    }

    /// Builds a point from `row`, or `None` if the row must be skipped.
    ///
    /// A row is skipped when any price or the volume is missing (or NaN), when
    /// its instant is not a positive nanosecond count, or when it is not
    /// strictly after `floor`.
    #[must_use]
    pub fn build(
        &self,
        row: &PriceRow,
        ticker: &Ticker,
        interval: Interval,
        floor: Option<DateTime<Utc>>,
    ) -> Option<SyncPoint> {
        let present = |value: Option<f64>| value.filter(|v| !v.is_nan());

        let open = present(row.open)?;
        let high = present(row.high)?;
        let low = present(row.low)?;
        let close = present(row.close)?;
        let adj_close = present(row.adj_close)?;
        let volume = row.volume?;

        let timestamp = row.timestamp.to_utc();
        if timestamp.timestamp_nanos_opt().is_none_or(|nanos| nanos <= 0) {
            return None;
        }
        if floor.is_some_and(|floor| timestamp <= floor) {
            return None;
        }

        Some(SyncPoint {
            exchange: ticker.exchange().to_string(),
            ticker: ticker.symbol().to_string(),
            interval,
            timestamp,
            open,
            high,
            low,
            close,
            adj_close,
            volume: volume.min(self.volume_ceiling),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn row(at: DateTime<Utc>) -> PriceRow {
        PriceRow::complete(at, 10.0, 12.0, 9.5, 11.0, 10.9, 1_000)
    }

    fn aapl() -> Ticker {
        Ticker::new("AAPL", "NASDAQ")
    }

    #[test]
    fn test_build_valid_row() {
        let point = PointBuilder::default()
            .build(&row(ts(1, 15)), &aapl(), Interval::Day1, None)
            .unwrap();
        assert_eq!(point.exchange, "NASDAQ");
        assert_eq!(point.ticker, "AAPL");
        assert_eq!(point.interval, Interval::Day1);
        assert_eq!(point.timestamp, ts(1, 15));
        assert_relative_eq!(point.open, 10.0);
        assert_relative_eq!(point.adj_close, 10.9);
        assert_eq!(point.volume, 1_000);
    }

    #[test]
    fn test_missing_or_nan_field_skips_row() {
        let builder = PointBuilder::default();
        let base = row(ts(1, 15));
        let variants = [
            PriceRow { open: None, ..base },
            PriceRow { high: Some(f64::NAN), ..base },
            PriceRow { low: None, ..base },
            PriceRow { close: Some(f64::NAN), ..base },
            PriceRow { adj_close: None, ..base },
            PriceRow { volume: None, ..base },
        ];
        for variant in &variants {
            assert!(builder.build(variant, &aapl(), Interval::Day1, None).is_none());
        }
    }

    #[test]
    fn test_floor_is_exclusive() {
        let builder = PointBuilder::default();
        let floor = Some(ts(1, 15));
        assert!(builder.build(&row(ts(1, 15)), &aapl(), Interval::Hour1, floor).is_none());
        assert!(builder.build(&row(ts(1, 14)), &aapl(), Interval::Hour1, floor).is_none());
        assert!(builder.build(&row(ts(1, 16)), &aapl(), Interval::Hour1, floor).is_some());
    }

    #[test]
    fn test_volume_clamped() {
        let over = PriceRow {
            volume: Some(3_000_000_000),
            ..row(ts(2, 0))
        };
        let point = PointBuilder::default()
            .build(&over, &aapl(), Interval::Day1, None)
            .unwrap();
        assert_eq!(point.volume, 2_147_483_647);

        let point = PointBuilder::new(500)
            .build(&row(ts(2, 0)), &aapl(), Interval::Day1, None)
            .unwrap();
        assert_eq!(point.volume, 500);
    }

    #[test]
    fn test_non_positive_instant_skipped() {
        let builder = PointBuilder::default();
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        assert!(builder.build(&row(epoch), &aapl(), Interval::Day1, None).is_none());

        let before = Utc.with_ymd_and_hms(1969, 7, 20, 20, 17, 0).unwrap();
        assert!(builder.build(&row(before), &aapl(), Interval::Day1, None).is_none());

        let far = NaiveDate::from_ymd_opt(2300, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let far_row = PriceRow {
            timestamp: far.into(),
            ..row(ts(1, 0))
        };
        assert!(builder.build(&far_row, &aapl(), Interval::Day1, None).is_none());
    }

    #[test]
    fn test_offset_and_naive_timestamps() {
        let builder = PointBuilder::default();
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let zoned = PriceRow {
            timestamp: new_york.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap().into(),
            ..row(ts(1, 0))
        };
        let point = builder.build(&zoned, &aapl(), Interval::Minute5, None).unwrap();
        assert_eq!(point.timestamp, Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap());

        let naive = PriceRow {
            timestamp: ts(1, 9).naive_utc().into(),
            ..row(ts(1, 0))
        };
        let point = builder.build(&naive, &aapl(), Interval::Minute5, None).unwrap();
        assert_eq!(point.timestamp, ts(1, 9));
    }
}
