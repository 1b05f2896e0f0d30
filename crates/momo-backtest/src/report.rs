//! Backtest report generation.

use momo_core::types::PortfolioState;
use momo_strategy::StrategyParams;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::{BacktestConfig, BacktestStats};

const RULE_HEAVY: &str = "═══════════════════════════════════════════════════════════\n";
const RULE_LIGHT: &str = "───────────────────────────────────────────────────────────\n";

/// Complete backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Configuration used
    pub config: BacktestConfig,
    /// Strategy parameters used
    pub params: StrategyParams,
    /// Statistics
    pub stats: BacktestStats,
    /// Final portfolio state
    pub final_portfolio: PortfolioState,
}

impl BacktestReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let stats = &self.stats;
        let mut s = String::new();

        s.push_str(RULE_HEAVY);
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str(RULE_HEAVY);
        s.push('\n');

        section(
            &mut s,
            "PERFORMANCE",
            &[
                ("Initial Capital", format!("${:.2}", stats.initial_capital)),
                ("Final Equity", format!("${:.2}", stats.final_equity)),
                ("Total Return", format!("{:.2}%", stats.total_return_pct)),
                ("Max Drawdown", format!("{:.2}%", stats.max_drawdown_pct)),
                ("Realized P&L", format!("${:.2}", stats.realized_pnl)),
            ],
        );

        section(
            &mut s,
            "DECISION CYCLES",
            &[
                ("Cycles Evaluated", stats.cycles.to_string()),
                ("Failed Cycles", stats.failed_cycles.to_string()),
                ("Blocked Cycles", stats.blocked_cycles.to_string()),
            ],
        );

        section(
            &mut s,
            "SIGNALS",
            &[
                ("Entry Intents", stats.entry_intents.to_string()),
                ("Stop-Loss Exits", stats.stop_loss_intents.to_string()),
                ("Take-Profit Exits", stats.take_profit_intents.to_string()),
            ],
        );

        section(
            &mut s,
            "TRADES",
            &[
                ("Total Trades", stats.total_trades.to_string()),
                ("Winning Trades", stats.winning_trades.to_string()),
                ("Losing Trades", stats.losing_trades.to_string()),
                ("Win Rate", format!("{:.2}%", stats.win_rate_pct)),
                (
                    "Open Positions",
                    self.final_portfolio.position_count().to_string(),
                ),
            ],
        );

        s.push_str(RULE_HEAVY);
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the equity curve to CSV.
    pub fn equity_to_csv(&self) -> String {
        let mut csv = String::from("timestamp,equity\n");
        for (ts, equity) in &self.stats.equity_curve {
            let _ = writeln!(csv, "{},{}", ts, equity);
        }
        csv
    }
}

fn section(s: &mut String, title: &str, rows: &[(&str, String)]) {
    s.push_str(title);
    s.push('\n');
    s.push_str(RULE_LIGHT);
    for (label, value) in rows {
        let _ = writeln!(s, "  {:<21}{}", format!("{}:", label), value);
    }
    s.push('\n');
}
