//! In-memory per-asset minute series.

use chrono::{DateTime, Utc};
use momo_core::{FeedError, PriceSample};
use std::collections::BTreeMap;

use crate::MarketView;

/// Historical minute-resolution price series for a set of assets.
///
/// Series are validated on insert: prices must be finite and timestamps in
/// ascending order. Reads go through [`MarketView`] time-travel views so a
/// consumer can only ever see samples at or before its chosen instant.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    series: BTreeMap<String, Vec<PriceSample>>,
}

impl MarketData {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the full series for one asset, replacing any existing one.
    pub fn insert_series(
        &mut self,
        symbol: impl Into<String>,
        samples: Vec<PriceSample>,
    ) -> Result<(), FeedError> {
        let symbol = symbol.into();

        for pair in samples.windows(2) {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(FeedError::UnsortedSeries { symbol });
            }
        }
        for sample in &samples {
            if !sample.price.is_finite() {
                return Err(FeedError::InvalidPrice {
                    symbol,
                    timestamp: sample.timestamp,
                    value: sample.price,
                });
            }
        }

        self.series.insert(symbol, samples);
        Ok(())
    }

    /// The series for one asset, oldest first.
    pub fn series(&self, symbol: &str) -> Option<&[PriceSample]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    /// All stored symbols, in symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of assets in the store.
    pub fn asset_count(&self) -> usize {
        self.series.len()
    }

    /// Total number of samples across all assets.
    pub fn sample_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Check if the store holds no samples.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }

    /// Earliest and latest sample timestamps across all assets.
    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self
            .series
            .values()
            .filter_map(|s| s.first())
            .map(|s| s.timestamp)
            .min()?;
        let last = self
            .series
            .values()
            .filter_map(|s| s.last())
            .map(|s| s.timestamp)
            .max()?;
        Some((
            DateTime::from_timestamp_millis(first)?,
            DateTime::from_timestamp_millis(last)?,
        ))
    }

    /// A price feed view frozen at the given instant.
    pub fn view_at(&self, now: DateTime<Utc>) -> MarketView<'_> {
        MarketView::new(self, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minute_ms(minute: i64) -> i64 {
        minute * 60_000
    }

    #[test]
    fn test_insert_and_read_back() {
        let mut data = MarketData::new();
        let samples = vec![
            PriceSample::new(minute_ms(0), 100.0),
            PriceSample::new(minute_ms(1), 101.0),
        ];
        data.insert_series("btc_usd", samples.clone()).unwrap();

        assert_eq!(data.series("btc_usd"), Some(samples.as_slice()));
        assert_eq!(data.asset_count(), 1);
        assert_eq!(data.sample_count(), 2);
        assert!(data.series("eth_usd").is_none());
    }

    #[test]
    fn test_unsorted_series_is_rejected() {
        let mut data = MarketData::new();
        let samples = vec![
            PriceSample::new(minute_ms(1), 100.0),
            PriceSample::new(minute_ms(0), 101.0),
        ];

        let err = data.insert_series("btc_usd", samples).unwrap_err();
        assert!(matches!(err, FeedError::UnsortedSeries { .. }));
    }

    #[test]
    fn test_non_finite_price_is_rejected() {
        let mut data = MarketData::new();
        let samples = vec![PriceSample::new(minute_ms(0), f64::NAN)];

        let err = data.insert_series("btc_usd", samples).unwrap_err();
        assert!(matches!(err, FeedError::InvalidPrice { .. }));
    }

    #[test]
    fn test_time_bounds_span_all_assets() {
        let mut data = MarketData::new();
        data.insert_series("btc_usd", vec![PriceSample::new(minute_ms(5), 1.0)])
            .unwrap();
        data.insert_series("eth_usd", vec![PriceSample::new(minute_ms(2), 1.0)])
            .unwrap();

        let (start, end) = data.time_bounds().unwrap();
        assert_eq!(start, Utc.timestamp_millis_opt(minute_ms(2)).unwrap());
        assert_eq!(end, Utc.timestamp_millis_opt(minute_ms(5)).unwrap());
    }

    #[test]
    fn test_empty_store_has_no_bounds() {
        assert!(MarketData::new().time_bounds().is_none());
        assert!(MarketData::new().is_empty());
    }
}
