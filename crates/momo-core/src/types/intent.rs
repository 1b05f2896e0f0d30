//! Order intents produced by the decision cycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why an intent was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentReason {
    /// Momentum pattern matched near the 12-hour low
    Entry,
    /// Price fell to the stop threshold
    StopLoss,
    /// Price reached the profit target and pulled back off its high
    TakeProfit,
}

impl std::fmt::Display for IntentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentReason::Entry => write!(f, "entry"),
            IntentReason::StopLoss => write!(f, "stop_loss"),
            IntentReason::TakeProfit => write!(f, "take_profit"),
        }
    }
}

/// A requested portfolio adjustment for one asset.
///
/// The target weight is the desired fraction of equity in [0, 1]; zero
/// closes the position. Intents are requests handed to the execution
/// collaborator, not applied state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Asset symbol
    pub symbol: String,
    /// Desired fraction of equity in [0, 1]
    pub target_weight: Decimal,
    /// Rule that produced the intent
    pub reason: IntentReason,
}

impl OrderIntent {
    /// Intent to open or size a position to the given weight.
    pub fn entry(symbol: impl Into<String>, target_weight: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            target_weight,
            reason: IntentReason::Entry,
        }
    }

    /// Intent to close a position.
    pub fn close(symbol: impl Into<String>, reason: IntentReason) -> Self {
        Self {
            symbol: symbol.into(),
            target_weight: Decimal::ZERO,
            reason,
        }
    }

    /// Check if this intent closes a position.
    pub fn is_exit(&self) -> bool {
        !matches!(self.reason, IntentReason::Entry)
    }
}
