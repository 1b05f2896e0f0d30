//! Order execution for simulated trading.

mod paper;

pub use paper::PaperExecution;
