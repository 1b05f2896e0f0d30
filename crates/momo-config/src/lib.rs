//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, LoggingConfig, MarketConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed with `MOMO` override file values,
/// with `__` separating nesting levels, e.g. `MOMO__LOGGING__LEVEL`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("MOMO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
