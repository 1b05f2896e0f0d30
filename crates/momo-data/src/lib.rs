//! Historical market data for the trading engine.
//!
//! [`MarketData`] holds validated per-asset minute series in memory;
//! [`MarketView`] exposes them through the price feed contract at a chosen
//! instant; [`CsvSource`] loads stores from CSV files.

mod csv_loader;
mod store;
mod view;

pub use csv_loader::CsvSource;
pub use store::MarketData;
pub use view::MarketView;

use momo_core::FeedError;
use std::path::Path;

/// Load a market data store from a CSV file.
pub async fn load_csv(path: impl AsRef<Path>) -> Result<MarketData, FeedError> {
    CsvSource::new(path.as_ref()).load().await
}
