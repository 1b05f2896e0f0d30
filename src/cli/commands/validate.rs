//! Validate configuration command.

use anyhow::Result;
use momo_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            if let Err(e) = config.strategy.validate() {
                println!("Strategy parameters invalid: {}", e);
                return Err(e.into());
            }
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Venue: {}", config.market.venue);
            println!("Universe: {}", config.strategy.universe.join(", "));
            println!("Position cap: {}", config.strategy.gate.max_positions);
            println!("Cash floor: {}", config.strategy.gate.min_cash);
            println!("Entry weight: {}", config.strategy.gate.entry_weight);
            println!("Stop-loss ratio: {}", config.strategy.exits.stop_loss_ratio);
            println!("Take-profit ratio: {}", config.strategy.exits.take_profit_ratio);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
