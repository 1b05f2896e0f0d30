//! Core data types for the trading engine.

mod frequency;
mod intent;
mod order;
mod portfolio;
mod sample;
mod snapshot;

pub use frequency::Frequency;
pub use intent::{IntentReason, OrderIntent};
pub use order::{Fill, Order, OrderStatus, Side};
pub use portfolio::{PortfolioState, Position};
pub use sample::PriceSample;
pub use snapshot::AssetSnapshot;
