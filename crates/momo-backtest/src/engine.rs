//! Minute-cycle backtesting engine.

use chrono::{DateTime, Duration, Utc};
use momo_core::error::{FeedError, TradeError, TradeResult};
use momo_core::traits::{ExecutionClient, PriceFeed};
use momo_core::types::{IntentReason, Side};
use momo_data::MarketData;
use momo_exec::PaperExecution;
use momo_strategy::{StrategyController, StrategyParams};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::report::BacktestReport;
use crate::statistics::{BacktestStats, TradeRecord};

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Initial capital
    pub initial_capital: Decimal,
    /// First cycle to evaluate; defaults to the start of the data
    pub start: Option<DateTime<Utc>>,
    /// Last cycle to evaluate; defaults to the end of the data
    pub end: Option<DateTime<Utc>>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: dec!(1000),
            start: None,
            end: None,
        }
    }
}

/// Backtesting engine.
///
/// Replays stored minute data one cycle at a time. Each minute settles
/// the previous cycle's orders first, then evaluates the strategy on a
/// view of the data truncated to that minute, so decisions never see
/// prices or fills from the future.
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// Run a backtest over the stored data.
    pub async fn run(
        &self,
        params: StrategyParams,
        data: &MarketData,
    ) -> TradeResult<BacktestReport> {
        let (data_start, data_end) = data.time_bounds().ok_or(TradeError::Feed(FeedError::Empty))?;
        let start = match self.config.start {
            Some(start) if start > data_start => start,
            _ => data_start,
        };
        let end = match self.config.end {
            Some(end) if end < data_end => end,
            _ => data_end,
        };
        if start > end {
            return Err(TradeError::Validation(format!(
                "Backtest window {} to {} is empty",
                start, end
            )));
        }

        let controller = StrategyController::new(params.clone())?;
        let exec = PaperExecution::new(self.config.initial_capital);
        let mut stats = BacktestStats::new(self.config.initial_capital);
        let mut reasons: HashMap<Uuid, IntentReason> = HashMap::new();

        info!(
            "Backtest from {} to {} over {} assets",
            start,
            end,
            controller.universe().len()
        );

        let mut at = start;
        while at <= end {
            let view = data.view_at(at);
            let mut prices = HashMap::new();
            for symbol in controller.universe() {
                if let Some(price) = view.current(symbol).and_then(|p| Decimal::try_from(p).ok()) {
                    prices.insert(symbol.clone(), price);
                }
            }

            let pre_settle = exec.portfolio_snapshot();
            for fill in exec.settle_at(&prices, at) {
                let pnl = match fill.side {
                    Side::Buy => None,
                    Side::Sell => pre_settle
                        .position(&fill.symbol)
                        .map(|p| (fill.price - p.cost_basis) * fill.quantity),
                };
                if let Some(pnl) = pnl {
                    info!("Realized {} on {} at {}", pnl, fill.symbol, fill.price);
                }
                match reasons.remove(&fill.order_id) {
                    Some(reason) => stats.add_trade(TradeRecord {
                        symbol: fill.symbol,
                        side: fill.side,
                        quantity: fill.quantity,
                        price: fill.price,
                        timestamp: fill.timestamp,
                        reason,
                        pnl,
                    }),
                    None => warn!("Fill for unknown order {}", fill.order_id),
                }
            }

            let portfolio = exec.portfolio_snapshot();
            stats.record_equity(at.timestamp_millis(), portfolio.equity());

            match controller.evaluate(&view, &portfolio, at) {
                Ok(report) => {
                    if report.gate_block.is_some() {
                        stats.record_block();
                    }
                    for intent in report.intents {
                        let reason = intent.reason;
                        stats.record_intent(reason);
                        match exec.submit(intent).await {
                            Ok(order) => {
                                reasons.insert(order.id, reason);
                            }
                            Err(err) => warn!("Order rejected: {}", err),
                        }
                    }
                }
                Err(err) => {
                    stats.record_failure();
                    warn!("Skipping cycle: {}", err);
                }
            }

            at += Duration::minutes(1);
        }

        let final_portfolio = exec.portfolio_snapshot();
        stats.finalize(&final_portfolio, exec.realized_pnl());
        info!("Backtest complete: final equity {}", stats.final_equity);

        Ok(BacktestReport {
            config: self.config.clone(),
            params,
            stats,
            final_portfolio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // One asset that sits flat, dips into its 12-hour low with three
    // rising 15-minute bars behind it at minute 780, then slides far
    // enough to trip the stop after the entry settles.
    fn dip_price(minute: i64) -> f64 {
        match minute {
            0..=724 => 100.0,
            725..=739 => 98.0,
            740..=754 => 98.5,
            755..=779 => 99.0,
            780 => 98.55,
            781..=785 => 98.6,
            _ => 98.0,
        }
    }

    fn dip_data(last_minute: i64) -> MarketData {
        let samples = (0..=last_minute)
            .map(|m| momo_core::types::PriceSample::new(m * 60_000, dip_price(m)))
            .collect();
        let mut data = MarketData::new();
        data.insert_series("btc_usd".to_string(), samples).unwrap();
        data
    }

    #[tokio::test]
    async fn test_entry_and_stop_round_trip() {
        let engine = BacktestEngine::new(BacktestConfig::default());
        let params = StrategyParams::for_universe(vec!["btc_usd".to_string()]);
        let data = dip_data(790);

        let report = engine.run(params, &data).await.unwrap();
        let stats = &report.stats;

        assert_eq!(stats.cycles, 791);
        assert_eq!(stats.failed_cycles, 0);
        assert_eq!(stats.entry_intents, 1);
        assert_eq!(stats.stop_loss_intents, 1);
        assert_eq!(stats.take_profit_intents, 0);

        // Entry fill then stop-loss fill.
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.trades[0].side, Side::Buy);
        assert_eq!(stats.trades[0].reason, IntentReason::Entry);
        assert_eq!(stats.trades[1].side, Side::Sell);
        assert_eq!(stats.trades[1].reason, IntentReason::StopLoss);
        assert!(stats.trades[1].pnl.unwrap() < Decimal::ZERO);

        assert_eq!(stats.losing_trades, 1);
        assert!(stats.realized_pnl < Decimal::ZERO);
        assert!(report.final_portfolio.positions.is_empty());
        assert!(report.final_portfolio.cash < dec!(1000));

        // Cash floor holds entries back while the position is on.
        assert_eq!(stats.blocked_cycles, 6);
    }

    #[tokio::test]
    async fn test_quiet_market_trades_nothing() {
        let engine = BacktestEngine::new(BacktestConfig {
            end: Some(Utc.timestamp_millis_opt(99 * 60_000).unwrap()),
            ..BacktestConfig::default()
        });
        let params = StrategyParams::for_universe(vec!["btc_usd".to_string()]);
        let data = dip_data(790);

        let report = engine.run(params, &data).await.unwrap();

        assert_eq!(report.stats.cycles, 100);
        assert_eq!(report.stats.total_trades, 0);
        assert_eq!(report.stats.final_equity, dec!(1000));
    }

    #[tokio::test]
    async fn test_empty_data_is_an_error() {
        let engine = BacktestEngine::new(BacktestConfig::default());
        let params = StrategyParams::for_universe(vec!["btc_usd".to_string()]);
        let data = MarketData::new();

        let result = engine.run(params, &data).await;
        assert!(result.is_err());
    }
}
