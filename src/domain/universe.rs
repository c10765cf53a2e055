//! Ticker universe parsing and data coverage.
//!
//! Parses ticker lists from configuration and summarises how much of each
//! requested series the data source actually holds.

use crate::domain::fundamental_data::FundamentalData;
use crate::domain::records::SeriesKind;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("ticker list is empty")]
    Empty,
}

/// Splits a comma-separated list, trimming and upper-casing each ticker.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    if input.trim().is_empty() {
        return Err(UniverseError::Empty);
    }

    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesCoverage {
    pub kind: SeriesKind,
    pub records: usize,
    pub latest: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerCoverage {
    pub ticker: String,
    pub series: Vec<SeriesCoverage>,
}

impl TickerCoverage {
    /// True when every series has at least one record.
    pub fn is_complete(&self) -> bool {
        self.series.iter().all(|s| s.records > 0)
    }
}

pub fn survey_coverage(data: &FundamentalData, tickers: &[String]) -> Vec<TickerCoverage> {
    tickers
        .iter()
        .map(|ticker| TickerCoverage {
            ticker: ticker.clone(),
            series: SeriesKind::ALL
                .into_iter()
                .map(|kind| SeriesCoverage {
                    kind,
                    records: data.series_len(kind, ticker),
                    latest: data.latest_date(kind, ticker),
                })
                .collect(),
        })
        .collect()
}
