//! Momentum dip-entry signal evaluation.

use momo_core::AssetSnapshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the signal engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Multiplier applied to the period low to form the entry band.
    /// 1.002 admits prices within 0.2% above the low.
    pub low_range_factor: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            low_range_factor: 1.002,
        }
    }
}

impl SignalConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.low_range_factor.is_finite() || self.low_range_factor <= 0.0 {
            return Err("Low range factor must be a positive number".into());
        }
        Ok(())
    }
}

/// Evaluates the fixed dip-entry pattern over per-asset snapshots.
///
/// An asset is a candidate when its latest five-minute price sits within the
/// band above the twelve-hour low and three consecutive bar means confirm a
/// rising sequence. A snapshot missing any statistic a rule reads fails that
/// rule. Candidates come back in input order; there is no ranking.
#[derive(Debug, Clone, Default)]
pub struct MomentumSignalEngine {
    config: SignalConfig,
}

impl MomentumSignalEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Symbols whose snapshots satisfy every entry rule, in input order.
    pub fn candidates(&self, snapshots: &[AssetSnapshot]) -> Vec<String> {
        snapshots
            .iter()
            .filter(|snapshot| self.is_candidate(snapshot))
            .map(|snapshot| snapshot.symbol.clone())
            .collect()
    }

    /// Evaluate all four entry rules for one snapshot.
    pub fn is_candidate(&self, snapshot: &AssetSnapshot) -> bool {
        let near_low = self.near_period_low(snapshot);
        let rising_first = Self::rising_first_bar(snapshot);
        let rising_second = Self::rising_second_bar(snapshot);
        let rising_third = Self::rising_third_bar(snapshot);

        debug!(
            "{}: near_low={} rising_first={} rising_second={} rising_third={}",
            snapshot.symbol, near_low, rising_first, rising_second, rising_third
        );

        near_low && rising_first && rising_second && rising_third
    }

    /// Latest five-minute price within the band above the period low.
    fn near_period_low(&self, snapshot: &AssetSnapshot) -> bool {
        match (snapshot.mid_5m, snapshot.low_12h) {
            (Some(mid), Some(low)) => mid < low * self.config.low_range_factor,
            _ => false,
        }
    }

    fn rising_first_bar(snapshot: &AssetSnapshot) -> bool {
        match (snapshot.first_bar, snapshot.initial_bar) {
            (Some(first), Some(initial)) => first > initial,
            _ => false,
        }
    }

    fn rising_second_bar(snapshot: &AssetSnapshot) -> bool {
        match (snapshot.second_bar, snapshot.first_bar) {
            (Some(second), Some(first)) => second > first,
            _ => false,
        }
    }

    /// The third bar is measured against the first bar, not the second.
    fn rising_third_bar(snapshot: &AssetSnapshot) -> bool {
        match (snapshot.third_bar, snapshot.first_bar) {
            (Some(third), Some(first)) => third > first,
            _ => false,
        }
    }
}
