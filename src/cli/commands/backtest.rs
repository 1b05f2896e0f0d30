//! Backtest command implementation.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use momo_backtest::{BacktestConfig, BacktestEngine};
use momo_config::load_config;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::BacktestArgs;

pub async fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

    // The command line can narrow or replace the configured universe.
    let mut params = config.strategy.clone();
    if !args.symbols.is_empty() {
        params.universe = args.symbols.clone();
    }
    params
        .validate()
        .context("Invalid strategy parameters")?;

    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.market.data_path));
    if !data_path.exists() {
        anyhow::bail!(
            "Data path '{}' does not exist. Provide a minute-price CSV with --data",
            data_path.display()
        );
    }

    info!(
        "Starting backtest on {} ({} quote)",
        config.market.venue, config.market.quote_currency
    );
    let data = momo_data::load_csv(&data_path).await?;

    let backtest_config = BacktestConfig {
        initial_capital: args.capital.unwrap_or(config.backtest.default_capital),
        start: parse_date(args.start.as_deref())?,
        end: parse_date(args.end.as_deref())?,
    };

    // Run backtest
    let engine = BacktestEngine::new(backtest_config);
    let report = engine.run(params, &data).await?;

    // Output results
    match args.output.as_str() {
        "json" => {
            let json = report.to_json()?;
            println!("{}", json);
        }
        _ => {
            println!("{}", report.summary());
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

fn parse_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'; use RFC 3339 or YYYY-MM-DD", raw))?;
    Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
}
