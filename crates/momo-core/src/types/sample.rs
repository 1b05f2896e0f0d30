//! Price sample types for per-asset feeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price observation in a continuous, time-ordered feed.
/// Uses f64 for fast window statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Observed price
    pub price: f64,
}

impl PriceSample {
    /// Create a new sample.
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp_nanos(0))
    }
}
