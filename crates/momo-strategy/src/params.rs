//! Strategy parameter set.

use momo_core::{TradeError, TradeResult};
use momo_risk::{ExitConfig, GateConfig};
use momo_signal::{AggregatorConfig, SignalConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete parameter set for the decision cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Tradable assets; the order defines candidate evaluation order
    pub universe: Vec<String>,
    /// Snapshot window sizes
    pub aggregator: AggregatorConfig,
    /// Entry pattern thresholds
    pub signal: SignalConfig,
    /// Exit rule thresholds
    pub exits: ExitConfig,
    /// Entry gating limits
    pub gate: GateConfig,
}

impl StrategyParams {
    /// Parameters for the given universe, everything else at defaults.
    pub fn for_universe(universe: Vec<String>) -> Self {
        Self {
            universe,
            ..Default::default()
        }
    }

    /// Validate the whole parameter set.
    pub fn validate(&self) -> TradeResult<()> {
        if self.universe.is_empty() {
            return Err(TradeError::Validation("At least one asset required".into()));
        }

        let mut seen = HashSet::new();
        for symbol in &self.universe {
            if symbol.is_empty() {
                return Err(TradeError::Validation("Empty asset symbol".into()));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(TradeError::Validation(format!(
                    "Duplicate asset in universe: {}",
                    symbol
                )));
            }
        }

        self.aggregator.validate().map_err(TradeError::Validation)?;
        self.signal.validate().map_err(TradeError::Validation)?;
        self.exits.validate().map_err(TradeError::Validation)?;
        self.gate.validate().map_err(TradeError::Validation)?;

        Ok(())
    }
}
