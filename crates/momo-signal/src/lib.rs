//! Snapshot aggregation and momentum signal evaluation.
//!
//! [`TimeframeAggregator`] reduces raw price history into per-asset
//! [`AssetSnapshot`](momo_core::AssetSnapshot) statistics;
//! [`MomentumSignalEngine`] evaluates the fixed dip-entry pattern over
//! those snapshots.

mod aggregate;
mod engine;

pub use aggregate::{AggregatorConfig, TimeframeAggregator};
pub use engine::{MomentumSignalEngine, SignalConfig};
