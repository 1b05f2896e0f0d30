//! Per-asset aggregate statistics computed once per decision cycle.

use serde::{Deserialize, Serialize};

/// Multi-timeframe statistics for one asset at one instant.
///
/// Every field is optional: a statistic is present only when the feed could
/// supply the full window it is computed from. A missing statistic is a
/// normal state (the asset is new, or history is still filling in), and any
/// rule reading a missing statistic evaluates to false rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// Asset symbol (e.g. `btc_usd`)
    pub symbol: String,
    /// Most recent price
    pub current_price: Option<f64>,
    /// Highest price over the last 15 one-minute bars
    pub high_15m: Option<f64>,
    /// Most recent five-minute bar
    pub mid_5m: Option<f64>,
    /// Lowest price over the last 24 thirty-minute bars (12 hours)
    pub low_12h: Option<f64>,
    /// Mean of the oldest quarter of the five-minute trend window
    pub initial_bar: Option<f64>,
    /// Mean of the second quarter of the trend window
    pub first_bar: Option<f64>,
    /// Mean of the third quarter of the trend window
    pub second_bar: Option<f64>,
    /// Mean of the newest quarter of the trend window
    pub third_bar: Option<f64>,
}

impl AssetSnapshot {
    /// Create a snapshot with no statistics defined.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            current_price: None,
            high_15m: None,
            mid_5m: None,
            low_12h: None,
            initial_bar: None,
            first_bar: None,
            second_bar: None,
            third_bar: None,
        }
    }

    /// True when all four bar means are defined.
    pub fn has_bar_means(&self) -> bool {
        self.initial_bar.is_some()
            && self.first_bar.is_some()
            && self.second_bar.is_some()
            && self.third_bar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_has_no_statistics() {
        let snapshot = AssetSnapshot::empty("btc_usd");
        assert_eq!(snapshot.symbol, "btc_usd");
        assert!(snapshot.current_price.is_none());
        assert!(!snapshot.has_bar_means());
    }

    #[test]
    fn test_has_bar_means_requires_all_four() {
        let mut snapshot = AssetSnapshot::empty("eth_usd");
        snapshot.initial_bar = Some(1.0);
        snapshot.first_bar = Some(2.0);
        snapshot.second_bar = Some(3.0);
        assert!(!snapshot.has_bar_means());

        snapshot.third_bar = Some(4.0);
        assert!(snapshot.has_bar_means());
    }
}
