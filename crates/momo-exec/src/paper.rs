//! Simulated execution ledger for backtesting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use momo_core::error::ExecError;
use momo_core::traits::ExecutionClient;
use momo_core::types::{Fill, Order, OrderIntent, PortfolioState, Position, Side};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Simulated execution with target-weight settlement.
///
/// Owns the authoritative portfolio. Orders submitted during a cycle rest
/// in the portfolio until `settle_at` runs with the next bar's prices, so
/// a fill is never visible to the cycle that requested it.
pub struct PaperExecution {
    ledger: Arc<Mutex<Ledger>>,
}

struct Ledger {
    portfolio: PortfolioState,
    fills: Vec<Fill>,
    realized_pnl: Decimal,
    /// Advanced by settlement; stamps submitted orders.
    clock: DateTime<Utc>,
}

impl PaperExecution {
    /// Create a ledger holding only cash.
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger {
                portfolio: PortfolioState::new(initial_capital),
                fills: Vec::new(),
                realized_pnl: Decimal::ZERO,
                clock: Utc::now(),
            })),
        }
    }

    /// Settle resting orders against the given prices.
    ///
    /// Positions are marked first so targets are sized against current
    /// equity. Each order then fills the delta between its target value
    /// (equity times weight) and the current position value; buys spend
    /// at most the cash on hand. An order whose symbol has no price
    /// stays open for the next settlement.
    ///
    /// Returns the fills produced by this settlement, in submission order.
    pub fn settle_at(&self, prices: &HashMap<String, Decimal>, at: DateTime<Utc>) -> Vec<Fill> {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.clock = at;

        for (symbol, position) in ledger.portfolio.positions.iter_mut() {
            if let Some(price) = prices.get(symbol) {
                position.mark(*price);
            }
        }

        let equity = ledger.portfolio.equity();
        let pending = std::mem::take(&mut ledger.portfolio.open_orders);
        let mut settled = Vec::new();

        for order in pending {
            let price = match prices.get(&order.symbol) {
                Some(price) if *price > Decimal::ZERO => *price,
                _ => {
                    warn!("No price for {} at {}; order stays open", order.symbol, at);
                    ledger.portfolio.open_orders.push(order);
                    continue;
                }
            };

            let current_value = ledger
                .portfolio
                .position(&order.symbol)
                .map(|p| p.quantity * price)
                .unwrap_or(Decimal::ZERO);
            let mut delta_value = equity * order.target_weight - current_value;

            if delta_value > ledger.portfolio.cash {
                debug!(
                    "Sizing {} buy down to available cash {} (wanted {})",
                    order.symbol, ledger.portfolio.cash, delta_value
                );
                delta_value = ledger.portfolio.cash;
            }

            let quantity = delta_value / price;
            if quantity == Decimal::ZERO {
                debug!("Order for {} already at target weight; nothing to fill", order.symbol);
                continue;
            }

            let (realized, flat) = {
                let position = ledger
                    .portfolio
                    .positions
                    .entry(order.symbol.clone())
                    .or_insert_with(|| Position::new(order.symbol.as_str(), Decimal::ZERO, Decimal::ZERO));
                let realized = position.apply_fill(quantity, price);
                (realized, position.is_flat())
            };

            ledger.portfolio.cash -= quantity * price;
            ledger.realized_pnl += realized;
            if flat {
                ledger.portfolio.positions.remove(&order.symbol);
            }

            let fill = Fill {
                order_id: order.id,
                symbol: order.symbol.clone(),
                side: if quantity > Decimal::ZERO { Side::Buy } else { Side::Sell },
                quantity: quantity.abs(),
                price,
                timestamp: at,
            };
            debug!(
                "Filled {} {} {} at {}",
                fill.side, fill.quantity, fill.symbol, fill.price
            );
            ledger.fills.push(fill.clone());
            settled.push(fill);
        }

        settled
    }

    /// All fills since inception, oldest first.
    pub fn fills(&self) -> Vec<Fill> {
        self.ledger.lock().unwrap().fills.clone()
    }

    /// Cumulative realized P&L on closed units.
    pub fn realized_pnl(&self) -> Decimal {
        self.ledger.lock().unwrap().realized_pnl
    }

    /// Snapshot of the portfolio without going through the async trait.
    pub fn portfolio_snapshot(&self) -> PortfolioState {
        self.ledger.lock().unwrap().portfolio.clone()
    }
}

#[async_trait]
impl ExecutionClient for PaperExecution {
    async fn portfolio(&self) -> Result<PortfolioState, ExecError> {
        Ok(self.ledger.lock().unwrap().portfolio.clone())
    }

    async fn submit(&self, intent: OrderIntent) -> Result<Order, ExecError> {
        if intent.target_weight < Decimal::ZERO || intent.target_weight > Decimal::ONE {
            return Err(ExecError::InvalidWeight {
                symbol: intent.symbol,
                weight: intent.target_weight,
            });
        }

        let mut ledger = self.ledger.lock().unwrap();
        debug!(
            "Accepted {} order for {}: target weight {}",
            intent.reason, intent.symbol, intent.target_weight
        );
        let order = Order::new(intent.symbol, intent.target_weight, ledger.clock);
        ledger.portfolio.open_orders.push(order.clone());

        Ok(order)
    }

    fn name(&self) -> &str {
        "Paper Execution"
    }
}
