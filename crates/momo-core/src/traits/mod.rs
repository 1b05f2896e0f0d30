//! Collaborator traits for the trading engine.

mod execution;
mod price_feed;

pub use execution::ExecutionClient;
pub use price_feed::PriceFeed;
