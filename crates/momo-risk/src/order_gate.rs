//! Cycle-level entry gating.

use momo_core::{OrderIntent, PortfolioState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Result of the entry gate for one cycle.
#[derive(Debug, Clone)]
pub enum GateDecision {
    /// Entry intents for every candidate, in candidate order
    Approved(Vec<OrderIntent>),
    /// No entries this cycle
    Blocked { reason: String },
}

impl GateDecision {
    /// Check if entries were blocked.
    pub fn is_blocked(&self) -> bool {
        matches!(self, GateDecision::Blocked { .. })
    }

    /// The approved intents, empty when blocked.
    pub fn into_intents(self) -> Vec<OrderIntent> {
        match self {
            GateDecision::Approved(intents) => intents,
            GateDecision::Blocked { .. } => Vec::new(),
        }
    }
}

/// Concurrency and capital limits on new entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Maximum number of concurrently open positions
    pub max_positions: usize,
    /// Cash floor in the quote currency; entries stop at or below it
    pub min_cash: Decimal,
    /// Equity fraction each entry targets
    pub entry_weight: Decimal,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_positions: 2,
            min_cash: dec!(100),
            entry_weight: dec!(0.95),
        }
    }
}

impl GateConfig {
    /// Validate the limits.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_positions == 0 {
            return Err("Position cap must be greater than 0".into());
        }
        if self.min_cash < Decimal::ZERO {
            return Err("Cash floor must not be negative".into());
        }
        if self.entry_weight <= Decimal::ZERO || self.entry_weight > Decimal::ONE {
            return Err("Entry weight must be within (0, 1]".into());
        }
        Ok(())
    }
}

/// Gates candidate entries on portfolio-wide constraints.
///
/// The checks cascade: the first one that trips blocks every entry for the
/// cycle, with no per-candidate filtering and no partial retries. A blocked
/// cycle leaves nothing behind; the next cycle re-evaluates from scratch.
#[derive(Debug, Clone, Default)]
pub struct OrderGate {
    config: GateConfig,
}

impl OrderGate {
    /// Create a gate with the given limits.
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Apply the cascade to this cycle's candidates.
    pub fn evaluate(&self, candidates: &[String], portfolio: &PortfolioState) -> GateDecision {
        if portfolio.has_open_orders() {
            return GateDecision::Blocked {
                reason: format!(
                    "{} order(s) awaiting settlement",
                    portfolio.open_orders.len()
                ),
            };
        }

        if portfolio.position_count() >= self.config.max_positions {
            return GateDecision::Blocked {
                reason: format!(
                    "Position cap reached: {} of {}",
                    portfolio.position_count(),
                    self.config.max_positions
                ),
            };
        }

        if portfolio.cash <= self.config.min_cash {
            return GateDecision::Blocked {
                reason: format!(
                    "Cash {} at or below the {} floor",
                    portfolio.cash, self.config.min_cash
                ),
            };
        }

        let intents = candidates
            .iter()
            .map(|symbol| OrderIntent::entry(symbol.clone(), self.config.entry_weight))
            .collect();
        GateDecision::Approved(intents)
    }
}
