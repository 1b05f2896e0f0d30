//! The per-cycle decision controller.

use chrono::{DateTime, Utc};
use momo_core::{
    AssetSnapshot, CycleError, OrderIntent, PortfolioState, PriceFeed, TradeResult,
};
use momo_risk::{ExitPolicy, GateDecision, OrderGate};
use momo_signal::{MomentumSignalEngine, TimeframeAggregator};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::StrategyParams;

/// Everything one decision cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// The time step that was evaluated
    pub at: DateTime<Utc>,
    /// Per-asset statistics, in universe order
    pub snapshots: Vec<AssetSnapshot>,
    /// Assets that matched the entry pattern, in universe order
    pub candidates: Vec<String>,
    /// Requested adjustments: entries first, then exits
    pub intents: Vec<OrderIntent>,
    /// Why entries were blocked, when the gate tripped
    pub gate_block: Option<String>,
}

/// Runs one decision cycle in fixed order.
///
/// Each call aggregates snapshots for the whole universe, evaluates entry
/// candidates, gates them against the current portfolio, applies the exit
/// rules to open positions, and returns the merged intents. The controller
/// holds configuration only: it retains nothing between cycles, performs no
/// I/O, and never mutates the portfolio it is handed.
pub struct StrategyController {
    params: StrategyParams,
    aggregator: TimeframeAggregator,
    engine: MomentumSignalEngine,
    exit_policy: ExitPolicy,
    gate: OrderGate,
}

impl StrategyController {
    /// Build a controller from validated parameters.
    pub fn new(params: StrategyParams) -> TradeResult<Self> {
        params.validate()?;
        Ok(Self {
            aggregator: TimeframeAggregator::new(params.aggregator.clone()),
            engine: MomentumSignalEngine::new(params.signal.clone()),
            exit_policy: ExitPolicy::new(params.exits.clone()),
            gate: OrderGate::new(params.gate.clone()),
            params,
        })
    }

    /// The configured universe.
    pub fn universe(&self) -> &[String] {
        &self.params.universe
    }

    /// Evaluate one cycle against the feed's current view.
    ///
    /// A feed failure aborts the cycle with an error naming the failed time
    /// step; the portfolio is untouched either way, and the next cycle
    /// starts from scratch.
    pub fn evaluate(
        &self,
        feed: &dyn PriceFeed,
        portfolio: &PortfolioState,
        at: DateTime<Utc>,
    ) -> Result<CycleReport, CycleError> {
        debug!("Evaluating cycle at {}", at);
        info!("Available cash: {}", portfolio.cash);

        let mut snapshots = Vec::with_capacity(self.params.universe.len());
        for symbol in &self.params.universe {
            let snapshot = self
                .aggregator
                .snapshot(feed, symbol)
                .map_err(|source| CycleError::new(at, source))?;
            snapshots.push(snapshot);
        }

        let candidates = self.engine.candidates(&snapshots);

        let mut gate_block = None;
        let mut intents = match self.gate.evaluate(&candidates, portfolio) {
            GateDecision::Approved(entries) => entries,
            GateDecision::Blocked { reason } => {
                info!("Entries blocked: {}", reason);
                gate_block = Some(reason);
                Vec::new()
            }
        };

        let exits = self.exit_policy.exits(portfolio, &snapshots);

        // One intent per asset: an exit supersedes an entry for the same
        // symbol, matching the net effect of applying both targets in
        // cycle order.
        if !exits.is_empty() {
            let closing: HashSet<&str> = exits.iter().map(|i| i.symbol.as_str()).collect();
            intents.retain(|intent| !closing.contains(intent.symbol.as_str()));
        }

        for exit in &exits {
            if let Some(position) = portfolio.position(&exit.symbol) {
                info!(
                    "Closing {} at {} ({}): P&L {}",
                    exit.symbol,
                    position.last_price,
                    exit.reason,
                    position.unrealized_pnl()
                );
            }
        }
        intents.extend(exits);

        Ok(CycleReport {
            at,
            snapshots,
            candidates,
            intents,
            gate_block,
        })
    }
}
