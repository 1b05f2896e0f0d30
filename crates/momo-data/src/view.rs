//! Time-travel price feed views.

use chrono::{DateTime, Utc};
use momo_core::{FeedError, Frequency, PriceFeed, PriceSample};

use crate::MarketData;

/// A [`PriceFeed`] frozen at one instant of a [`MarketData`] store.
///
/// History windows are right-aligned: bar `k` of `n` (counting back from
/// the newest) ends at `now - k * frequency`, and its value is the most
/// recent minute sample at or before that instant. Bars ending before the
/// series begins are dropped from the front, producing the short windows
/// the aggregator treats as undefined. Samples after `now` do not exist
/// from this view's perspective.
#[derive(Debug, Clone, Copy)]
pub struct MarketView<'a> {
    data: &'a MarketData,
    now_ms: i64,
}

impl<'a> MarketView<'a> {
    /// Create a view of the store at the given instant.
    pub fn new(data: &'a MarketData, now: DateTime<Utc>) -> Self {
        Self {
            data,
            now_ms: now.timestamp_millis(),
        }
    }

    /// The instant this view is frozen at.
    pub fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_ms)
            .unwrap_or_else(|| DateTime::from_timestamp_nanos(0))
    }

    /// Most recent sample at or before `t`, by binary search.
    fn sample_at(series: &[PriceSample], t: i64) -> Option<f64> {
        let idx = series.partition_point(|s| s.timestamp <= t);
        if idx == 0 {
            None
        } else {
            Some(series[idx - 1].price)
        }
    }
}

impl PriceFeed for MarketView<'_> {
    fn current(&self, symbol: &str) -> Option<f64> {
        let series = self.data.series(symbol)?;
        Self::sample_at(series, self.now_ms)
    }

    fn history(
        &self,
        symbol: &str,
        bars: usize,
        frequency: Frequency,
    ) -> Result<Vec<f64>, FeedError> {
        let Some(series) = self.data.series(symbol) else {
            return Ok(Vec::new());
        };

        let step = frequency.as_millis();
        let mut window = Vec::with_capacity(bars);
        for k in (0..bars).rev() {
            let t = self.now_ms - k as i64 * step;
            if let Some(price) = Self::sample_at(series, t) {
                window.push(price);
            }
        }
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minute_ms(minute: i64) -> i64 {
        minute * 60_000
    }

    fn at_minute(minute: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(minute_ms(minute)).unwrap()
    }

    /// One sample per minute, price equal to the minute index.
    fn minute_indexed_store(minutes: i64) -> MarketData {
        let samples = (0..minutes)
            .map(|m| PriceSample::new(minute_ms(m), m as f64))
            .collect();
        let mut data = MarketData::new();
        data.insert_series("btc_usd", samples).unwrap();
        data
    }

    #[test]
    fn test_current_is_latest_visible_sample() {
        let data = minute_indexed_store(100);

        assert_eq!(data.view_at(at_minute(99)).current("btc_usd"), Some(99.0));
        assert_eq!(data.view_at(at_minute(50)).current("btc_usd"), Some(50.0));
        // Between samples the last observation carries forward
        let between = Utc.timestamp_millis_opt(minute_ms(50) + 30_000).unwrap();
        assert_eq!(data.view_at(between).current("btc_usd"), Some(50.0));
    }

    #[test]
    fn test_samples_after_now_are_invisible() {
        let data = minute_indexed_store(100);
        let view = data.view_at(at_minute(10));

        assert_eq!(view.current("btc_usd"), Some(10.0));
        let window = view.history("btc_usd", 5, Frequency::Min1).unwrap();
        assert_eq!(window, vec![6.0, 7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_five_minute_bars_sample_backwards_from_now() {
        let data = minute_indexed_store(100);
        let view = data.view_at(at_minute(60));

        // Bars end at minutes 50, 55, 60
        let window = view.history("btc_usd", 3, Frequency::Min5).unwrap();
        assert_eq!(window, vec![50.0, 55.0, 60.0]);
    }

    #[test]
    fn test_thirty_minute_bars() {
        let data = minute_indexed_store(100);
        let view = data.view_at(at_minute(90));

        let window = view.history("btc_usd", 3, Frequency::Min30).unwrap();
        assert_eq!(window, vec![30.0, 60.0, 90.0]);
    }

    #[test]
    fn test_short_history_drops_oldest_bars() {
        // Series starts at minute 0; a 24-bar 30m window at minute 90
        // only has bars back to minute 0
        let data = minute_indexed_store(100);
        let view = data.view_at(at_minute(90));

        let window = view.history("btc_usd", 24, Frequency::Min30).unwrap();
        assert_eq!(window, vec![0.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn test_unknown_symbol_is_empty_not_an_error() {
        let data = minute_indexed_store(10);
        let view = data.view_at(at_minute(5));

        assert!(view.current("doge_usd").is_none());
        assert!(view.history("doge_usd", 15, Frequency::Min1).unwrap().is_empty());
    }

    #[test]
    fn test_view_before_series_start_is_empty() {
        let mut data = MarketData::new();
        data.insert_series(
            "btc_usd",
            vec![PriceSample::new(minute_ms(100), 42.0)],
        )
        .unwrap();
        let view = data.view_at(at_minute(50));

        assert!(view.current("btc_usd").is_none());
        assert!(view.history("btc_usd", 5, Frequency::Min1).unwrap().is_empty());
    }
}
