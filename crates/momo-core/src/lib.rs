//! Core types and traits for the momentum trading engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PriceSample, AssetSnapshot)
//! - Portfolio and order types
//! - Order intents produced by the decision cycle
//! - Collaborator traits for price feeds and order execution

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CycleError, ExecError, FeedError, TradeError, TradeResult};
pub use traits::*;
pub use types::*;
