//! Order and fill types for target-weight execution.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, awaiting settlement
    Open,
    /// Settled at a market price
    Filled,
}

impl OrderStatus {
    /// Check if the order can still fill.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Open)
    }
}

/// A target-weight order: rebalance one asset to a fraction of equity.
///
/// Weight 0 closes the position; weight 0.95 sizes it to 95% of equity.
/// The delta quantity is computed by the ledger at settlement, one bar
/// after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID
    pub id: Uuid,
    /// Asset symbol
    pub symbol: String,
    /// Desired fraction of equity in [0, 1]
    pub target_weight: Decimal,
    /// Current status
    pub status: OrderStatus,
    /// When the order was submitted
    pub submitted_at: DateTime<Utc>,
}

impl Order {
    /// Create a new open order.
    pub fn new(symbol: impl Into<String>, target_weight: Decimal, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            target_weight,
            status: OrderStatus::Open,
            submitted_at,
        }
    }
}

/// A settled order execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Order this fill settles
    pub order_id: Uuid,
    /// Asset symbol
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Units transacted (always positive)
    pub quantity: Decimal,
    /// Settlement price
    pub price: Decimal,
    /// When the fill occurred
    pub timestamp: DateTime<Utc>,
}

impl Fill {
    /// Cash value of the fill.
    pub fn value(&self) -> Decimal {
        self.quantity * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_order_is_open() {
        let order = Order::new("btc_usd", dec!(0.95), Utc::now());
        assert_eq!(order.status, OrderStatus::Open);
        assert!(order.status.is_open());
        assert_eq!(order.target_weight, dec!(0.95));
    }

    #[test]
    fn test_fill_value() {
        let fill = Fill {
            order_id: Uuid::new_v4(),
            symbol: "btc_usd".to_string(),
            side: Side::Buy,
            quantity: dec!(2),
            price: dec!(105.5),
            timestamp: Utc::now(),
        };
        assert_eq!(fill.value(), dec!(211.0));
    }
}
