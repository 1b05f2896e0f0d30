//! Benchmarks for snapshot aggregation and signal evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use momo_core::{AssetSnapshot, FeedError, Frequency, PriceFeed};
use momo_signal::{MomentumSignalEngine, TimeframeAggregator};

/// Feed backed by one long synthetic minute series per symbol.
struct SyntheticFeed {
    minutes: Vec<f64>,
}

impl SyntheticFeed {
    fn new(size: usize) -> Self {
        let minutes = (0..size)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
            .collect();
        Self { minutes }
    }
}

impl PriceFeed for SyntheticFeed {
    fn current(&self, _symbol: &str) -> Option<f64> {
        self.minutes.last().copied()
    }

    fn history(
        &self,
        _symbol: &str,
        bars: usize,
        frequency: Frequency,
    ) -> Result<Vec<f64>, FeedError> {
        let step = (frequency.as_secs() / 60) as usize;
        let sampled: Vec<f64> = self.minutes.iter().copied().step_by(step).collect();
        let start = sampled.len().saturating_sub(bars);
        Ok(sampled[start..].to_vec())
    }
}

fn generate_snapshots(count: usize) -> Vec<AssetSnapshot> {
    (0..count)
        .map(|i| {
            let mut snapshot = AssetSnapshot::empty(format!("asset_{:04}_usd", i));
            let base = 100.0 + i as f64;
            snapshot.current_price = Some(base);
            snapshot.high_15m = Some(base + 1.0);
            snapshot.mid_5m = Some(base);
            snapshot.low_12h = Some(base - 0.1);
            snapshot.initial_bar = Some(base - 0.3);
            snapshot.first_bar = Some(base - 0.2);
            snapshot.second_bar = Some(base - 0.1);
            snapshot.third_bar = Some(base - if i % 2 == 0 { 0.05 } else { 0.25 });
            snapshot
        })
        .collect()
}

fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Aggregation");

    for size in [1000, 10000, 100000].iter() {
        let feed = SyntheticFeed::new(*size);

        group.bench_with_input(BenchmarkId::new("snapshot", size), &feed, |b, feed| {
            let aggregator = TimeframeAggregator::default();
            b.iter(|| aggregator.snapshot(black_box(feed), black_box("btc_usd")))
        });
    }

    group.finish();
}

fn benchmark_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("Candidates");

    for count in [10, 100, 1000].iter() {
        let snapshots = generate_snapshots(*count);

        group.bench_with_input(
            BenchmarkId::new("evaluate", count),
            &snapshots,
            |b, snapshots| {
                let engine = MomentumSignalEngine::default();
                b.iter(|| engine.candidates(black_box(snapshots)))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_aggregation, benchmark_candidates);
criterion_main!(benches);
