//! Per-cycle decision orchestration.
//!
//! [`StrategyController`] runs one decision cycle in fixed order over a
//! validated [`StrategyParams`] set: aggregate snapshots, evaluate the
//! momentum pattern, gate entries, apply exit rules, and return the merged
//! intents.

mod controller;
mod params;

pub use controller::{CycleReport, StrategyController};
pub use params::StrategyParams;
