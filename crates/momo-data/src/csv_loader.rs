//! CSV market data loading.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use momo_core::{FeedError, PriceSample};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::MarketData;

/// CSV record format: one price observation per row.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Symbol", alias = "asset", alias = "Asset", alias = "pair", alias = "Pair")]
    symbol: String,
    #[serde(alias = "Timestamp", alias = "date", alias = "Date", alias = "time", alias = "Time")]
    timestamp: String,
    #[serde(alias = "Price", alias = "close", alias = "Close", alias = "last", alias = "Last")]
    price: f64,
}

/// CSV source for historical minute data.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Create a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load every row into a validated market data store.
    ///
    /// Rows may arrive in any order; each asset's series is sorted by
    /// timestamp before insertion. Non-finite prices and unparsable rows
    /// fail the whole load.
    pub async fn load(&self) -> Result<MarketData, FeedError> {
        let file = File::open(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut by_symbol: BTreeMap<String, Vec<PriceSample>> = BTreeMap::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| FeedError::Parse(e.to_string()))?;
            let timestamp = parse_timestamp(&record.timestamp)?;
            by_symbol
                .entry(record.symbol)
                .or_default()
                .push(PriceSample::new(timestamp, record.price));
        }

        let mut data = MarketData::new();
        for (symbol, mut samples) in by_symbol {
            samples.sort_by_key(|s| s.timestamp);
            data.insert_series(symbol, samples)?;
        }

        info!(
            "Loaded {} samples for {} assets from {}",
            data.sample_count(),
            data.asset_count(),
            self.path.display()
        );
        Ok(data)
    }

    /// The file this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(raw: &str) -> Result<i64, FeedError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp_millis());
    }

    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"];
    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    if let Ok(ts) = raw.parse::<i64>() {
        // Assume milliseconds if more than 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(FeedError::Parse(format!("Could not parse date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2018-03-01T09:30:00Z").is_ok());
        assert!(parse_timestamp("2018-03-01 09:30:00").is_ok());
        assert!(parse_timestamp("2018-03-01 09:30").is_ok());
        assert!(parse_timestamp("2018-03-01").is_ok());
        assert!(parse_timestamp("1519896600000").is_ok()); // Unix ms
        assert!(parse_timestamp("1519896600").is_ok()); // Unix sec
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_second_and_millisecond_timestamps_agree() {
        let from_secs = parse_timestamp("1519896600").unwrap();
        let from_millis = parse_timestamp("1519896600000").unwrap();
        assert_eq!(from_secs, from_millis);
    }

    #[tokio::test]
    async fn test_load_groups_and_sorts_by_symbol() {
        let path = std::env::temp_dir().join(format!("momo_csv_test_{}.csv", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "symbol,timestamp,price").unwrap();
            writeln!(file, "btc_usd,2018-03-01 00:01:00,10100").unwrap();
            writeln!(file, "eth_usd,2018-03-01 00:00:00,850").unwrap();
            writeln!(file, "btc_usd,2018-03-01 00:00:00,10000").unwrap();
        }

        let data = CsvSource::new(&path).load().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(data.asset_count(), 2);
        let btc = data.series("btc_usd").unwrap();
        assert_eq!(btc.len(), 2);
        assert_eq!(btc[0].price, 10000.0);
        assert_eq!(btc[1].price, 10100.0);
        assert_eq!(data.series("eth_usd").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let err = CsvSource::new("/nonexistent/prices.csv")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }

    #[tokio::test]
    async fn test_bad_row_fails_the_load() {
        let path = std::env::temp_dir().join(format!("momo_csv_bad_{}.csv", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "symbol,timestamp,price").unwrap();
            writeln!(file, "btc_usd,not-a-date,10000").unwrap();
        }

        let err = CsvSource::new(&path).load().await.unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, FeedError::Parse(_)));
    }
}
