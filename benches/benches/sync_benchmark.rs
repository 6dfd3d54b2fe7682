//! Benchmarks for the CPU-bound parts of a sync pass.
//!
//! Run with: `cargo bench --package stocksync-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use stocksync_bench::{points, reference_now, rows, store_state, universe, write_ticker_dir};
use stocksync_lib::line::encode_points;
use stocksync_lib::{Interval, PointBuilder, SyncPlanner, Ticker, TickerRepository};
use tempfile::TempDir;

fn planner_benchmark(c: &mut Criterion) {
    let now = reference_now();
    let mut group = c.benchmark_group("planner");

    for size in [1_000, 10_000, 50_000] {
        let tickers = universe("NASDAQ", size);
        let (existing, last_entries) = store_state(&tickers, 20, 30, now);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("plan", size), &tickers, |b, tickers| {
            b.iter(|| SyncPlanner::plan(tickers, &existing, &last_entries, Interval::Day1, now));
        });
    }

    group.finish();
}

fn builder_benchmark(c: &mut Criterion) {
    let builder = PointBuilder::default();
    let ticker = Ticker::new("AAPL", "NASDAQ");
    let start = reference_now() - chrono::TimeDelta::days(29);
    let mut group = c.benchmark_group("builder");

    for size in [1_000, 10_000, 100_000] {
        let input = rows(size, Interval::Minute5, start);
        let floor = Some(start + chrono::TimeDelta::hours(1));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &input, |b, input| {
            b.iter(|| {
                input
                    .iter()
                    .filter_map(|row| builder.build(row, &ticker, Interval::Minute5, floor))
                    .count()
            });
        });
    }

    group.finish();
}

fn line_protocol_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_protocol");

    for size in [1_000, 30_000] {
        let input = points(size, Interval::Minute5, reference_now());
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &input, |b, input| {
            b.iter(|| encode_points(input).len());
        });
    }

    group.finish();
}

fn tickers_benchmark(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    write_ticker_dir(temp_dir.path(), &["NASDAQ", "NYSE", "XETRA"], 5_000).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("tickers/load_dir", |b| {
        b.to_async(&runtime)
            .iter(|| async { TickerRepository::load_dir(temp_dir.path()).await.unwrap().len() });
    });
}

criterion_group!(
    benches,
    planner_benchmark,
    builder_benchmark,
    line_protocol_benchmark,
    tickers_benchmark
);
criterion_main!(benches);
