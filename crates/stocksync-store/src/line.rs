//! InfluxDB line protocol encoding.
//!
//! One line per point:
//!
//! ```text
//! interval_5m,exchange=NASDAQ,ticker=AAPL open=1.5,high=2,low=1,close=1.75,adj_close=1.75,volume=1200i 1704205800000000000
//! ```
//!
//! The measurement is the interval table, `exchange` and `ticker` are tags,
//! prices are float fields, volume is an integer field and the trailing
//! timestamp is in nanoseconds.

use std::fmt::Write as _;

use stocksync_types::SyncPoint;

/// Escapes a measurement name (commas and spaces).
#[must_use]
pub fn escape_measurement(name: &str) -> String {
    escape(name, &[',', ' '])
}

/// Escapes a tag key or value (commas, equals signs and spaces).
#[must_use]
pub fn escape_tag(value: &str) -> String {
    escape(value, &[',', '=', ' '])
}

fn escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' | '\r' => escaped.push(' '),
            c if special.contains(&c) => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn float(out: &mut String, value: f64) {
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        let _ = write!(out, "{value}");
    }
}

/// Appends one point as a line to `out`.
///
/// Returns false, leaving `out` unchanged, if the timestamp cannot be
/// expressed in nanoseconds.
pub fn encode_point(out: &mut String, point: &SyncPoint) -> bool {
    let Some(nanos) = point.timestamp.timestamp_nanos_opt() else {
        return false;
    };

    out.push_str(&escape_measurement(&point.interval.table_name()));
    out.push_str(",exchange=");
    out.push_str(&escape_tag(&point.exchange));
    out.push_str(",ticker=");
    out.push_str(&escape_tag(&point.ticker));

    for (i, (name, value)) in [
        ("open", point.open),
        ("high", point.high),
        ("low", point.low),
        ("close", point.close),
        ("adj_close", point.adj_close),
    ]
    .into_iter()
    .enumerate()
    {
        out.push(if i == 0 { ' ' } else { ',' });
        out.push_str(name);
        out.push('=');
        float(out, value);
    }

    let _ = writeln!(out, ",volume={}i {nanos}", point.volume);
    true
}

/// Encodes a batch of points, skipping any whose timestamp is out of range.
#[must_use]
pub fn encode_points(points: &[SyncPoint]) -> String {
    let mut out = String::with_capacity(points.len() * 128);
    let mut skipped = 0usize;
    for point in points {
        if !encode_point(&mut out, point) {
            skipped += 1;
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "dropped points with out-of-range timestamps");
    }
    out
}
