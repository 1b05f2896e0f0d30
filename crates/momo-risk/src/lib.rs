//! Exit rules and entry gating.
//!
//! [`ExitPolicy`] applies the stop-loss and trailing take-profit rules to
//! open positions; [`OrderGate`] enforces the cycle-level concurrency and
//! capital limits on new entries.

mod exit_policy;
mod order_gate;

pub use exit_policy::{ExitConfig, ExitPolicy};
pub use order_gate::{GateConfig, GateDecision, OrderGate};
