//! Error types for the trading engine.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Execution error: {0}")]
    Exec(#[from] ExecError),

    #[error("Cycle error: {0}")]
    Cycle(#[from] CycleError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Price feed and historical data errors.
///
/// Insufficient history is not an error; feeds report it by returning a
/// window shorter than requested. These variants cover malformed data.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid price for {symbol} at {timestamp}: {value}")]
    InvalidPrice {
        symbol: String,
        timestamp: i64,
        value: f64,
    },

    #[error("Series for {symbol} is not in time order")]
    UnsortedSeries { symbol: String },

    #[error("No data loaded")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Order execution errors.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Order rejected for {symbol}: {reason}")]
    OrderRejected { symbol: String, reason: String },

    #[error("Target weight {weight} for {symbol} is outside [0, 1]")]
    InvalidWeight {
        symbol: String,
        weight: rust_decimal::Decimal,
    },

    #[error("Execution error: {0}")]
    Internal(String),
}

/// A decision cycle that could not complete.
///
/// Carries the time step at which evaluation failed so the driving loop can
/// log it and move on to the next bar.
#[derive(Error, Debug)]
#[error("Cycle at {at} failed: {source}")]
pub struct CycleError {
    /// The time step being evaluated when the failure occurred.
    pub at: DateTime<Utc>,
    #[source]
    pub source: FeedError,
}

impl CycleError {
    /// Wrap a feed failure with the time step it occurred at.
    pub fn new(at: DateTime<Utc>, source: FeedError) -> Self {
        Self { at, source }
    }
}

/// Result type alias for engine operations.
pub type TradeResult<T> = Result<T, TradeError>;
