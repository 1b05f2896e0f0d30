//! Position and portfolio types.
//!
//! Positions are owned and mutated by the execution ledger; the decision
//! cycle receives the whole portfolio as an immutable per-cycle value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Order;

/// A long position in a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Asset symbol
    pub symbol: String,
    /// Units held
    pub quantity: Decimal,
    /// Average per-unit entry price
    pub cost_basis: Decimal,
    /// Most recent mark price
    pub last_price: Decimal,
}

impl Position {
    /// Create a new position.
    pub fn new(symbol: impl Into<String>, quantity: Decimal, cost_basis: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            cost_basis,
            last_price: cost_basis,
        }
    }

    /// Market value at the last mark.
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.last_price
    }

    /// Unrealized profit or loss at the last mark.
    pub fn unrealized_pnl(&self) -> Decimal {
        (self.last_price - self.cost_basis) * self.quantity
    }

    /// Check if the position holds no units.
    pub fn is_flat(&self) -> bool {
        self.quantity == Decimal::ZERO
    }

    /// Update the mark price.
    pub fn mark(&mut self, price: Decimal) {
        self.last_price = price;
    }

    /// Apply a signed quantity change at the given price.
    ///
    /// Positive quantities add to the position and recompute the average
    /// entry price; negative quantities reduce it (clamped at flat) and
    /// return the realized P&L on the closed units.
    pub fn apply_fill(&mut self, quantity: Decimal, price: Decimal) -> Decimal {
        let mut realized = Decimal::ZERO;

        if quantity >= Decimal::ZERO {
            let total_cost = self.quantity * self.cost_basis + quantity * price;
            let new_quantity = self.quantity + quantity;
            if new_quantity != Decimal::ZERO {
                self.cost_basis = total_cost / new_quantity;
            }
            self.quantity = new_quantity;
        } else {
            let close_qty = quantity.abs().min(self.quantity);
            realized = close_qty * (price - self.cost_basis);
            self.quantity -= close_qty;
        }

        self.last_price = price;
        realized
    }
}

/// Portfolio handed to the decision cycle: cash, open positions, and orders
/// submitted but not yet filled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioState {
    /// Available cash in the quote currency
    pub cash: Decimal,
    /// Open positions keyed by symbol, iterated in symbol order
    pub positions: BTreeMap<String, Position>,
    /// Orders awaiting settlement
    pub open_orders: Vec<Order>,
}

impl PortfolioState {
    /// Create a portfolio holding only cash.
    pub fn new(cash: Decimal) -> Self {
        Self {
            cash,
            positions: BTreeMap::new(),
            open_orders: Vec::new(),
        }
    }

    /// Get a position by symbol.
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Check if any order is awaiting settlement.
    pub fn has_open_orders(&self) -> bool {
        !self.open_orders.is_empty()
    }

    /// Number of open positions.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Cash plus the marked value of all positions.
    pub fn equity(&self) -> Decimal {
        self.cash
            + self
                .positions
                .values()
                .map(|p| p.market_value())
                .sum::<Decimal>()
    }
}
