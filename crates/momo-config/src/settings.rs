//! Configuration structures.

use momo_strategy::StrategyParams;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub strategy: StrategyParams,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "momo-trader".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            dir: None,
        }
    }
}

/// Market data settings.
///
/// The venue is a label carried into logs and reports; no live
/// connection is made to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub venue: String,
    pub quote_currency: String,
    pub data_path: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            venue: "bitfinex".to_string(),
            quote_currency: "usd".to_string(),
            data_path: "data/minute_prices.csv".to_string(),
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSettings {
    pub default_capital: Decimal,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            default_capital: dec!(1000),
        }
    }
}
