//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::allocation::ScreenedAllocation;
use crate::domain::config_validation::{validate_data_config, validate_strategy_config};
use crate::domain::error::FundscreenError;
use crate::domain::interval::Interval;
use crate::domain::screen::{
    DEFAULT_MIN_DIVIDEND, DEFAULT_MIN_OWNERSHIP_PCT, DEFAULT_RAW_WEIGHT, ScreenCriteria,
};
use crate::domain::strategy::{DEFAULT_NAME, DividendQualityStrategy, Strategy};
use crate::domain::universe::{parse_tickers, survey_coverage};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::FundamentalDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "fundscreen",
    about = "Fundamental quality screen with equal-weight allocation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one allocation round
    Allocate {
        #[arg(short, long)]
        config: PathBuf,
        /// Overrides [data] path
        #[arg(long)]
        data: Option<PathBuf>,
        /// Only use records dated on or before this day (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print each ticker's screen outcome
        #[arg(long)]
        explain: bool,
    },
    /// Validate a configuration and show the declared inputs
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show record counts and latest dates per ticker and series
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// List tickers available in the data source
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Allocate {
            config,
            data,
            as_of,
            output,
            explain,
        } => run_allocate(
            &config,
            data.as_deref(),
            as_of.as_deref(),
            output.as_deref(),
            explain,
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, data } => run_info(&config, data.as_deref()),
        Command::ListTickers { config, data } => run_list_tickers(&config, data.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, FundscreenError> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

pub fn build_strategy(config: &dyn ConfigPort) -> Result<DividendQualityStrategy, FundscreenError> {
    validate_strategy_config(config)?;

    let defaults = DividendQualityStrategy::default();

    let name = config
        .get_string("strategy", "name")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let interval = match config.get_string("strategy", "interval") {
        Some(s) => s
            .parse::<Interval>()
            .map_err(|e| FundscreenError::ConfigInvalid {
                section: "strategy".into(),
                key: "interval".into(),
                reason: e.to_string(),
            })?,
        None => defaults.interval,
    };

    let tickers = match config.get_string("strategy", "tickers") {
        Some(s) => parse_tickers(&s)?,
        None => defaults.tickers,
    };

    let criteria = ScreenCriteria {
        min_dividend: config.get_double("strategy", "min_dividend", DEFAULT_MIN_DIVIDEND),
        min_ownership_pct: config.get_double(
            "strategy",
            "min_ownership_pct",
            DEFAULT_MIN_OWNERSHIP_PCT,
        ),
        raw_weight: config.get_double("strategy", "raw_weight", DEFAULT_RAW_WEIGHT),
    };

    Ok(DividendQualityStrategy {
        name,
        interval,
        tickers,
        criteria,
    })
}

/// Opens the configured data source. `data_override` replaces `[data] path`.
pub fn build_data_port(
    config: &dyn ConfigPort,
    data_override: Option<&Path>,
) -> Result<Box<dyn FundamentalDataPort>, FundscreenError> {
    let path = match data_override {
        Some(p) => p.display().to_string(),
        None => {
            validate_data_config(config)?;
            config.require_string("data", "path")?
        }
    };

    let source = config
        .get_string("data", "source")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());

    debug!("opening {} data source at {}", source, path);

    match source.as_str() {
        "csv" => Ok(Box::new(CsvAdapter::new(PathBuf::from(path)))),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            use crate::adapters::sqlite_adapter::SqliteAdapter;
            use crate::domain::config_validation::pool_size;
            Ok(Box::new(SqliteAdapter::open(&path, pool_size(config)?)?))
        }
        #[cfg(not(feature = "sqlite"))]
        "sqlite" => Err(FundscreenError::ConfigInvalid {
            section: "data".into(),
            key: "source".into(),
            reason: "sqlite feature is not enabled".into(),
        }),
        other => Err(FundscreenError::ConfigInvalid {
            section: "data".into(),
            key: "source".into(),
            reason: format!("unknown data source '{}' (expected csv or sqlite)", other),
        }),
    }
}

pub fn parse_as_of(value: &str) -> Result<NaiveDate, FundscreenError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        FundscreenError::ConfigInvalid {
            section: "allocate".into(),
            key: "as_of".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })
}

/// Fetches every declared series and runs one decision round.
pub fn run_round(
    data_port: &dyn FundamentalDataPort,
    strategy: &DividendQualityStrategy,
    as_of: Option<NaiveDate>,
) -> Result<ScreenedAllocation, FundscreenError> {
    let requests = strategy.data_requests();
    info!(
        "fetching {} series for {} tickers",
        requests.len(),
        strategy.assets().len()
    );
    let mut data = data_port.fetch_requests(&requests)?;
    if let Some(date) = as_of {
        data = data.as_of(date);
    }
    Ok(strategy.explain(&data))
}

/// `-o` wins over `[report] output`.
pub fn resolve_output(output: Option<&Path>, config: &dyn ConfigPort) -> Option<String> {
    output
        .map(|p| p.display().to_string())
        .or_else(|| config.get_string("report", "output"))
        .filter(|s| !s.trim().is_empty())
}

fn run_allocate(
    config_path: &Path,
    data_override: Option<&Path>,
    as_of: Option<&str>,
    output: Option<&Path>,
    explain: bool,
) -> Result<(), FundscreenError> {
    let config = load_config(config_path)?;
    let strategy = build_strategy(&config)?;
    let as_of = as_of.map(parse_as_of).transpose()?;
    let data_port = build_data_port(&config, data_override)?;

    eprintln!(
        "Running {} ({}) on {}",
        strategy.name,
        strategy.interval,
        strategy.tickers.join(", ")
    );
    if let Some(date) = as_of {
        eprintln!("  As of: {}", date);
    }

    let result = run_round(data_port.as_ref(), &strategy, as_of)?;

    if explain {
        eprintln!("\n=== Screen ===");
        for entry in &result.outcomes {
            eprintln!(
                "  {:<6} {:<8} {}",
                entry.ticker,
                entry.outcome.label(),
                entry.outcome.detail()
            );
        }
    }

    eprintln!(
        "\n{} passed, {} skipped of {} tickers",
        result.passed_count(),
        result.skipped_count(),
        result.outcomes.len()
    );

    for (ticker, weight) in result.allocation.iter() {
        println!("{}\t{:.4}", ticker, weight);
    }

    if let Some(path) = resolve_output(output, &config) {
        CsvReportAdapter.write(&result, &strategy, &path)?;
        eprintln!("\nReport written to: {}", path);
    }

    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), FundscreenError> {
    let config = load_config(config_path)?;
    let strategy = build_strategy(&config)?;
    validate_data_config(&config)?;

    eprintln!("\nStrategy: {}", strategy.name);
    eprintln!("  interval: {}", strategy.interval());
    eprintln!("  assets:   {}", strategy.assets().join(", "));
    eprintln!(
        "  screen:   revenue > costOfRevenue, dividend > {}, ownershipPercent > {}",
        strategy.criteria.min_dividend, strategy.criteria.min_ownership_pct
    );
    eprintln!("  raw weight per pass: {}", strategy.criteria.raw_weight);

    eprintln!("\nData requests:");
    for request in strategy.data_requests() {
        eprintln!("  ({}, {})", request.kind, request.ticker);
    }

    eprintln!("\nConfiguration is valid.");
    Ok(())
}

fn run_info(config_path: &Path, data_override: Option<&Path>) -> Result<(), FundscreenError> {
    let config = load_config(config_path)?;
    let strategy = build_strategy(&config)?;
    let data_port = build_data_port(&config, data_override)?;

    let data = data_port.fetch_requests(&strategy.data_requests())?;
    for coverage in survey_coverage(&data, &strategy.tickers) {
        for series in &coverage.series {
            match series.latest {
                Some(latest) => println!(
                    "{} {}: {} records, latest {}",
                    coverage.ticker, series.kind, series.records, latest
                ),
                None => println!("{} {}: no data", coverage.ticker, series.kind),
            }
        }
        if !coverage.is_complete() {
            eprintln!("  {} will be skipped until every series has data", coverage.ticker);
        }
    }
    Ok(())
}

fn run_list_tickers(
    config_path: &Path,
    data_override: Option<&Path>,
) -> Result<(), FundscreenError> {
    let config = load_config(config_path)?;
    let data_port = build_data_port(&config, data_override)?;

    let tickers = data_port.list_tickers()?;
    if tickers.is_empty() {
        eprintln!("No tickers found");
    } else {
        for ticker in &tickers {
            println!("{}", ticker);
        }
        eprintln!("{} tickers found", tickers.len());
    }
    Ok(())
}
