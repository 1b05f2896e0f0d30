//! Multi-timeframe snapshot aggregation.

use momo_core::{AssetSnapshot, FeedError, Frequency, PriceFeed};
use serde::{Deserialize, Serialize};

/// Window sizes for snapshot statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// One-minute bars feeding the recent high
    pub high_bars: usize,
    /// Thirty-minute bars feeding the period low
    pub low_bars: usize,
    /// Five-minute bars partitioned into the four trend bar means
    pub trend_bars: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            high_bars: 15,
            low_bars: 24,
            trend_bars: 12,
        }
    }
}

impl AggregatorConfig {
    /// Validate the window sizes.
    pub fn validate(&self) -> Result<(), String> {
        if self.high_bars == 0 {
            return Err("High window must be greater than 0".into());
        }
        if self.low_bars == 0 {
            return Err("Low window must be greater than 0".into());
        }
        if self.trend_bars == 0 || self.trend_bars % 4 != 0 {
            return Err("Trend window must be a positive multiple of 4".into());
        }
        Ok(())
    }
}

/// Reduces a price feed into per-asset snapshot statistics.
///
/// Every statistic requires its full window: when the feed returns fewer
/// bars than requested the statistic is left undefined rather than computed
/// over partial data. Deterministic and side-effect free.
#[derive(Debug, Clone, Default)]
pub struct TimeframeAggregator {
    config: AggregatorConfig,
}

impl TimeframeAggregator {
    /// Create an aggregator with the given windows.
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Compute the snapshot for one asset from the feed's current view.
    pub fn snapshot(
        &self,
        feed: &dyn PriceFeed,
        symbol: &str,
    ) -> Result<AssetSnapshot, FeedError> {
        let mut snapshot = AssetSnapshot::empty(symbol);

        snapshot.current_price = feed.current(symbol);

        let highs = self.full_window(feed, symbol, self.config.high_bars, Frequency::Min1)?;
        snapshot.high_15m = highs.as_deref().map(window_max);

        let mids = self.full_window(feed, symbol, 1, Frequency::Min5)?;
        snapshot.mid_5m = mids.as_deref().map(|w| w[0]);

        let lows = self.full_window(feed, symbol, self.config.low_bars, Frequency::Min30)?;
        snapshot.low_12h = lows.as_deref().map(window_min);

        if let Some(trend) = self.full_window(feed, symbol, self.config.trend_bars, Frequency::Min5)? {
            let group = self.config.trend_bars / 4;
            snapshot.initial_bar = Some(mean(&trend[..group]));
            snapshot.first_bar = Some(mean(&trend[group..2 * group]));
            snapshot.second_bar = Some(mean(&trend[2 * group..3 * group]));
            snapshot.third_bar = Some(mean(&trend[3 * group..]));
        }

        Ok(snapshot)
    }

    /// Fetch a window, returning None unless the feed supplied every bar.
    fn full_window(
        &self,
        feed: &dyn PriceFeed,
        symbol: &str,
        bars: usize,
        frequency: Frequency,
    ) -> Result<Option<Vec<f64>>, FeedError> {
        let window = feed.history(symbol, bars, frequency)?;
        if window.len() == bars {
            Ok(Some(window))
        } else {
            Ok(None)
        }
    }
}

fn window_max(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn window_min(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::INFINITY, f64::min)
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Feed answering from fixed per-frequency windows.
    struct StubFeed {
        current: Option<f64>,
        windows: HashMap<Frequency, Vec<f64>>,
    }

    impl StubFeed {
        fn new() -> Self {
            Self {
                current: None,
                windows: HashMap::new(),
            }
        }

        fn with(mut self, frequency: Frequency, window: Vec<f64>) -> Self {
            self.windows.insert(frequency, window);
            self
        }
    }

    impl PriceFeed for StubFeed {
        fn current(&self, _symbol: &str) -> Option<f64> {
            self.current
        }

        fn history(
            &self,
            _symbol: &str,
            bars: usize,
            frequency: Frequency,
        ) -> Result<Vec<f64>, FeedError> {
            let window = self.windows.get(&frequency).cloned().unwrap_or_default();
            let start = window.len().saturating_sub(bars);
            Ok(window[start..].to_vec())
        }
    }

    #[test]
    fn test_bar_means_partition_twelve_bars() {
        let trend: Vec<f64> = (1..=12).map(f64::from).collect();
        let feed = StubFeed::new().with(Frequency::Min5, trend);

        let aggregator = TimeframeAggregator::default();
        let snapshot = aggregator.snapshot(&feed, "btc_usd").unwrap();

        assert_eq!(snapshot.initial_bar, Some(2.0));
        assert_eq!(snapshot.first_bar, Some(5.0));
        assert_eq!(snapshot.second_bar, Some(8.0));
        assert_eq!(snapshot.third_bar, Some(11.0));
        // The single-bar 5m window shares the same series
        assert_eq!(snapshot.mid_5m, Some(12.0));
    }

    #[test]
    fn test_high_and_low_windows() {
        let minute: Vec<f64> = (1..=15).map(f64::from).collect();
        let half_hour: Vec<f64> = (100..124).map(f64::from).collect();
        let feed = StubFeed::new()
            .with(Frequency::Min1, minute)
            .with(Frequency::Min30, half_hour);

        let aggregator = TimeframeAggregator::default();
        let snapshot = aggregator.snapshot(&feed, "btc_usd").unwrap();

        assert_eq!(snapshot.high_15m, Some(15.0));
        assert_eq!(snapshot.low_12h, Some(100.0));
    }

    #[test]
    fn test_short_window_leaves_statistic_undefined() {
        // Eleven 5m bars cannot fill the twelve-bar trend window
        let trend: Vec<f64> = (1..=11).map(f64::from).collect();
        let feed = StubFeed::new().with(Frequency::Min5, trend);

        let aggregator = TimeframeAggregator::default();
        let snapshot = aggregator.snapshot(&feed, "btc_usd").unwrap();

        assert!(snapshot.initial_bar.is_none());
        assert!(snapshot.third_bar.is_none());
        assert!(!snapshot.has_bar_means());
        // The one-bar mid window still fills
        assert_eq!(snapshot.mid_5m, Some(11.0));
    }

    #[test]
    fn test_empty_feed_yields_empty_snapshot() {
        let feed = StubFeed::new();
        let aggregator = TimeframeAggregator::default();
        let snapshot = aggregator.snapshot(&feed, "new_listing").unwrap();

        assert_eq!(snapshot, AssetSnapshot::empty("new_listing"));
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let feed = StubFeed::new()
            .with(Frequency::Min1, (1..=15).map(f64::from).collect())
            .with(Frequency::Min5, (1..=12).map(f64::from).collect())
            .with(Frequency::Min30, (1..=24).map(f64::from).collect());

        let aggregator = TimeframeAggregator::default();
        let first = aggregator.snapshot(&feed, "btc_usd").unwrap();
        let second = aggregator.snapshot(&feed, "btc_usd").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_validation() {
        assert!(AggregatorConfig::default().validate().is_ok());

        let mut config = AggregatorConfig::default();
        config.trend_bars = 10;
        assert!(config.validate().is_err());

        config.trend_bars = 8;
        assert!(config.validate().is_ok());

        config.high_bars = 0;
        assert!(config.validate().is_err());
    }
}
