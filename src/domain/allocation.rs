//! Allocation decision: screen every ticker, weight the survivors, normalize.

use crate::domain::fundamental_data::FundamentalData;
use crate::domain::screen::{ScreenCriteria, ScreenOutcome};
use log::debug;
use std::collections::BTreeMap;

/// Ticker to portfolio weight.
///
/// Weights are non-negative and sum to exactly 1 when any ticker passed the
/// screen, or to 0 when none did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationMap {
    weights: BTreeMap<String, f64>,
}

impl AllocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: &str, weight: f64) {
        self.weights.insert(ticker.to_string(), weight);
    }

    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.weights.get(ticker).copied()
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.weights.contains_key(ticker)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Divides every weight by the total. A zero total is left untouched.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for weight in self.weights.values_mut() {
                *weight /= total;
            }
        }
    }
}

/// The allocation handed back to the host for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAllocation {
    pub weights: AllocationMap,
}

impl TargetAllocation {
    pub fn new(weights: AllocationMap) -> Self {
        Self { weights }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerOutcome {
    pub ticker: String,
    pub outcome: ScreenOutcome,
}

/// An allocation together with the screen outcome behind each ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenedAllocation {
    pub allocation: AllocationMap,
    pub outcomes: Vec<TickerOutcome>,
}

impl ScreenedAllocation {
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_passed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.is_skipped())
            .count()
    }
}

/// Runs one decision round over `tickers`.
///
/// Tickers missing any series get no entry. Passing tickers get
/// `criteria.raw_weight`, failing ones 0, then weights are normalized.
pub fn allocate(
    tickers: &[String],
    data: &FundamentalData,
    criteria: &ScreenCriteria,
) -> AllocationMap {
    screen_and_allocate(tickers, data, criteria).allocation
}

/// Same decision as [`allocate`], keeping each ticker's screen outcome.
pub fn screen_and_allocate(
    tickers: &[String],
    data: &FundamentalData,
    criteria: &ScreenCriteria,
) -> ScreenedAllocation {
    let mut allocation = AllocationMap::new();
    let mut outcomes = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        let outcome = criteria.screen(data, ticker);
        match &outcome {
            ScreenOutcome::Passed => allocation.insert(ticker, criteria.raw_weight),
            ScreenOutcome::Failed(_) => allocation.insert(ticker, 0.0),
            ScreenOutcome::Skipped(_) => {}
        }
        debug!("{}: {} {}", ticker, outcome.label(), outcome.detail());
        outcomes.push(TickerOutcome {
            ticker: ticker.clone(),
            outcome,
        });
    }

    allocation.normalize();

    ScreenedAllocation {
        allocation,
        outcomes,
    }
}
