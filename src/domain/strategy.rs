//! Strategy declaration and the host-facing decision interface.

use crate::domain::allocation::{ScreenedAllocation, TargetAllocation, screen_and_allocate};
use crate::domain::fundamental_data::FundamentalData;
use crate::domain::interval::Interval;
use crate::domain::records::SeriesKind;
use crate::domain::screen::ScreenCriteria;

pub const DEFAULT_TICKERS: [&str; 4] = ["AAPL", "MSFT", "JNJ", "XOM"];
pub const DEFAULT_NAME: &str = "Dividend Quality Screen";

/// One data series the strategy asks the host to supply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataRequest {
    pub kind: SeriesKind,
    pub ticker: String,
}

/// What the host sees: declared inputs plus a once-per-interval decision.
pub trait Strategy {
    fn interval(&self) -> Interval;
    fn assets(&self) -> &[String];
    fn data_requests(&self) -> Vec<DataRequest>;
    fn run(&self, data: &FundamentalData) -> TargetAllocation;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividendQualityStrategy {
    pub name: String,
    pub interval: Interval,
    pub tickers: Vec<String>,
    pub criteria: ScreenCriteria,
}

impl Default for DividendQualityStrategy {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            interval: Interval::OneDay,
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            criteria: ScreenCriteria::default(),
        }
    }
}

impl DividendQualityStrategy {
    /// Runs the decision and keeps each ticker's screen outcome.
    pub fn explain(&self, data: &FundamentalData) -> ScreenedAllocation {
        screen_and_allocate(&self.tickers, data, &self.criteria)
    }
}

impl Strategy for DividendQualityStrategy {
    fn interval(&self) -> Interval {
        self.interval
    }

    fn assets(&self) -> &[String] {
        &self.tickers
    }

    /// All dividend requests, then financial statements, then ownership.
    fn data_requests(&self) -> Vec<DataRequest> {
        SeriesKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.tickers.iter().map(move |ticker| DataRequest {
                    kind,
                    ticker: ticker.clone(),
                })
            })
            .collect()
    }

    fn run(&self, data: &FundamentalData) -> TargetAllocation {
        TargetAllocation::new(self.explain(data).allocation)
    }
}
