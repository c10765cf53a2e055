//! Configuration validation.
//!
//! Validates the `[strategy]` and `[data]` sections before any data is read.

use crate::domain::error::FundscreenError;
use crate::domain::interval::Interval;
use crate::domain::universe::parse_tickers;
use crate::ports::config_port::ConfigPort;

pub const DATA_SOURCES: [&str; 2] = ["csv", "sqlite"];
pub const DEFAULT_POOL_SIZE: u32 = 4;
pub const MAX_POOL_SIZE: u32 = 64;

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    validate_interval(config)?;
    validate_tickers(config)?;
    validate_raw_weight(config)?;
    validate_min_dividend(config)?;
    validate_min_ownership(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    validate_source(config)?;
    config.require_string("data", "path")?;
    pool_size(config)?;
    Ok(())
}

/// `[data] pool_size`, checked to lie in `1..=MAX_POOL_SIZE`.
pub fn pool_size(config: &dyn ConfigPort) -> Result<u32, FundscreenError> {
    let raw = config.get_int("data", "pool_size", i64::from(DEFAULT_POOL_SIZE));
    match u32::try_from(raw) {
        Ok(size) if (1..=MAX_POOL_SIZE).contains(&size) => Ok(size),
        _ => Err(FundscreenError::ConfigInvalid {
            section: "data".to_string(),
            key: "pool_size".to_string(),
            reason: format!("pool_size must be between 1 and {MAX_POOL_SIZE}, got {raw}"),
        }),
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> FundscreenError {
    FundscreenError::ConfigInvalid {
        section: "strategy".to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    match config.get_string("strategy", "interval") {
        None => Ok(()),
        Some(s) => s
            .parse::<Interval>()
            .map(|_| ())
            .map_err(|e| invalid("interval", e.to_string())),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    match config.get_string("strategy", "tickers") {
        None => Ok(()),
        Some(s) => parse_tickers(&s)
            .map(|_| ())
            .map_err(|e| invalid("tickers", e.to_string())),
    }
}

fn validate_raw_weight(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    let value = config.get_double("strategy", "raw_weight", 0.25);
    if !(value > 0.0 && value <= 1.0) {
        return Err(invalid("raw_weight", "raw_weight must be in (0, 1]"));
    }
    Ok(())
}

fn validate_min_dividend(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    let value = config.get_double("strategy", "min_dividend", 0.0);
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            "min_dividend",
            "min_dividend must be a finite non-negative number",
        ));
    }
    Ok(())
}

fn validate_min_ownership(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    let value = config.get_double("strategy", "min_ownership_pct", 50.0);
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(
            "min_ownership_pct",
            "min_ownership_pct must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_source(config: &dyn ConfigPort) -> Result<(), FundscreenError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string());
    let source = source.trim().to_lowercase();
    if !DATA_SOURCES.contains(&source.as_str()) {
        return Err(FundscreenError::ConfigInvalid {
            section: "data".to_string(),
            key: "source".to_string(),
            reason: format!("unknown data source '{}' (expected csv or sqlite)", source),
        });
    }
    Ok(())
}
