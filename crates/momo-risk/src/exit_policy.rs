//! Stop-loss and trailing take-profit rules.

use momo_core::{AssetSnapshot, IntentReason, OrderIntent, PortfolioState, Position};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Exit rule thresholds, expressed as ratios of the average entry price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitConfig {
    /// Stop-loss trigger: close when price falls to this ratio of cost
    pub stop_loss_ratio: Decimal,
    /// Take-profit trigger: close when price reaches this ratio of cost
    pub take_profit_ratio: Decimal,
    /// Pullback band: take-profit requires price below this ratio of the
    /// recent high
    pub pullback_ratio: Decimal,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            stop_loss_ratio: dec!(0.995),
            take_profit_ratio: dec!(1.10),
            pullback_ratio: dec!(0.999),
        }
    }
}

impl ExitConfig {
    /// Validate the thresholds.
    pub fn validate(&self) -> Result<(), String> {
        if self.stop_loss_ratio <= Decimal::ZERO || self.stop_loss_ratio >= Decimal::ONE {
            return Err("Stop-loss ratio must be between 0 and 1".into());
        }
        if self.take_profit_ratio <= Decimal::ONE {
            return Err("Take-profit ratio must be greater than 1".into());
        }
        if self.pullback_ratio <= Decimal::ZERO || self.pullback_ratio > Decimal::ONE {
            return Err("Pullback ratio must be between 0 and 1".into());
        }
        Ok(())
    }
}

/// Applies the exit rules to every open position.
///
/// Evaluation makes two full passes over the same pre-cycle position set:
/// stop-losses first, then trailing take-profits. A position caught by both
/// rules is closed once, with the stop-loss reason. The policy reads
/// positions and never mutates them; closures are requested via intents.
#[derive(Debug, Clone, Default)]
pub struct ExitPolicy {
    config: ExitConfig,
}

impl ExitPolicy {
    /// Create a policy with the given thresholds.
    pub fn new(config: ExitConfig) -> Self {
        Self { config }
    }

    /// Close intents for every position caught by an exit rule.
    pub fn exits(
        &self,
        portfolio: &PortfolioState,
        snapshots: &[AssetSnapshot],
    ) -> Vec<OrderIntent> {
        let mut intents = Vec::new();
        let mut closing: BTreeSet<&str> = BTreeSet::new();

        for (symbol, position) in &portfolio.positions {
            if self.stop_loss_hit(position) {
                intents.push(OrderIntent::close(symbol.clone(), IntentReason::StopLoss));
                closing.insert(symbol.as_str());
            }
        }

        for (symbol, position) in &portfolio.positions {
            if closing.contains(symbol.as_str()) {
                continue;
            }
            let recent_high = snapshots
                .iter()
                .find(|s| s.symbol == *symbol)
                .and_then(|s| s.high_15m);
            if self.take_profit_hit(position, recent_high) {
                intents.push(OrderIntent::close(symbol.clone(), IntentReason::TakeProfit));
            }
        }

        intents
    }

    /// Price at or below the stop threshold.
    pub fn stop_loss_hit(&self, position: &Position) -> bool {
        position.last_price <= position.cost_basis * self.config.stop_loss_ratio
    }

    /// Price at or above the profit target and pulled back off the recent
    /// high. An undefined recent high makes the rule false.
    pub fn take_profit_hit(&self, position: &Position, recent_high: Option<f64>) -> bool {
        let Some(high) = recent_high.and_then(|h| Decimal::try_from(h).ok()) else {
            return false;
        };

        position.last_price >= position.cost_basis * self.config.take_profit_ratio
            && position.last_price < high * self.config.pullback_ratio
    }
}
