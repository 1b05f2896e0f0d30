//! Backtest statistics.

use chrono::{DateTime, Utc};
use momo_core::types::{IntentReason, PortfolioState, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Record of a single settled trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub side: Side,
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    /// Rule behind the order that produced this fill
    pub reason: IntentReason,
    /// Realized P&L, present on closing fills
    pub pnl: Option<Decimal>,
}

/// Backtest statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestStats {
    /// Initial capital
    pub initial_capital: Decimal,
    /// Final equity
    pub final_equity: Decimal,
    /// Total return percentage
    pub total_return_pct: Decimal,
    /// Maximum drawdown percentage
    pub max_drawdown_pct: Decimal,
    /// Realized P&L on closed units
    pub realized_pnl: Decimal,
    /// Decision cycles evaluated
    pub cycles: usize,
    /// Cycles skipped because the feed failed
    pub failed_cycles: usize,
    /// Cycles where the gate blocked entries
    pub blocked_cycles: usize,
    /// Entry intents emitted
    pub entry_intents: usize,
    /// Stop-loss intents emitted
    pub stop_loss_intents: usize,
    /// Take-profit intents emitted
    pub take_profit_intents: usize,
    /// Total number of settled trades
    pub total_trades: usize,
    /// Closing trades with positive realized P&L
    pub winning_trades: usize,
    /// Closing trades with negative realized P&L
    pub losing_trades: usize,
    /// Win rate over closing trades, as a percentage
    pub win_rate_pct: Decimal,
    /// Equity curve as (millisecond timestamp, equity)
    pub equity_curve: Vec<(i64, Decimal)>,
    /// All trades
    pub trades: Vec<TradeRecord>,
    /// Peak equity (for drawdown)
    peak_equity: Decimal,
}

impl BacktestStats {
    /// Create new stats tracker.
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            initial_capital,
            final_equity: initial_capital,
            total_return_pct: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
            realized_pnl: Decimal::ZERO,
            cycles: 0,
            failed_cycles: 0,
            blocked_cycles: 0,
            entry_intents: 0,
            stop_loss_intents: 0,
            take_profit_intents: 0,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate_pct: Decimal::ZERO,
            equity_curve: Vec::new(),
            trades: Vec::new(),
            peak_equity: initial_capital,
        }
    }

    /// Record equity for one cycle.
    pub fn record_equity(&mut self, timestamp: i64, equity: Decimal) {
        self.equity_curve.push((timestamp, equity));

        if equity > self.peak_equity {
            self.peak_equity = equity;
        }

        if self.peak_equity > Decimal::ZERO {
            let drawdown = (self.peak_equity - equity) / self.peak_equity * dec!(100);
            if drawdown > self.max_drawdown_pct {
                self.max_drawdown_pct = drawdown;
            }
        }

        self.cycles += 1;
    }

    /// Count an emitted intent by its rule.
    pub fn record_intent(&mut self, reason: IntentReason) {
        match reason {
            IntentReason::Entry => self.entry_intents += 1,
            IntentReason::StopLoss => self.stop_loss_intents += 1,
            IntentReason::TakeProfit => self.take_profit_intents += 1,
        }
    }

    /// Count a cycle where the gate blocked entries.
    pub fn record_block(&mut self) {
        self.blocked_cycles += 1;
    }

    /// Count a cycle skipped on feed failure.
    pub fn record_failure(&mut self) {
        self.failed_cycles += 1;
    }

    /// Add a trade record.
    pub fn add_trade(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
        self.total_trades += 1;
    }

    /// Calculate final statistics.
    pub fn finalize(&mut self, portfolio: &PortfolioState, realized_pnl: Decimal) {
        self.final_equity = portfolio.equity();
        self.realized_pnl = realized_pnl;

        if self.initial_capital > Decimal::ZERO {
            self.total_return_pct =
                (self.final_equity - self.initial_capital) / self.initial_capital * dec!(100);
        }

        for trade in &self.trades {
            if let Some(pnl) = trade.pnl {
                if pnl > Decimal::ZERO {
                    self.winning_trades += 1;
                } else if pnl < Decimal::ZERO {
                    self.losing_trades += 1;
                }
            }
        }

        let closed = self.winning_trades + self.losing_trades;
        if closed > 0 {
            self.win_rate_pct = Decimal::from(self.winning_trades * 100) / Decimal::from(closed);
        }
    }
}
