//! The fundamental quality screen applied to each ticker.
//!
//! A ticker passes when its latest financial statement shows revenue above
//! cost of revenue, its latest dividend is positive and its latest
//! institutional ownership is above half of outstanding shares.

use crate::domain::fundamental_data::FundamentalData;
use crate::domain::records::{
    DividendRecord, FinancialStatementRecord, InstitutionalOwnershipRecord, SeriesKind,
};
use std::fmt;

/// Raw weight given to each passing ticker before normalization.
///
/// Fixed at a quarter regardless of universe size.
pub const DEFAULT_RAW_WEIGHT: f64 = 0.25;
pub const DEFAULT_MIN_DIVIDEND: f64 = 0.0;
pub const DEFAULT_MIN_OWNERSHIP_PCT: f64 = 50.0;

/// Thresholds for the screen. Comparisons are strict (`>`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCriteria {
    pub min_dividend: f64,
    pub min_ownership_pct: f64,
    pub raw_weight: f64,
}

impl Default for ScreenCriteria {
    fn default() -> Self {
        Self {
            min_dividend: DEFAULT_MIN_DIVIDEND,
            min_ownership_pct: DEFAULT_MIN_OWNERSHIP_PCT,
            raw_weight: DEFAULT_RAW_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailReason {
    RevenueNotAboveCost { revenue: f64, cost_of_revenue: f64 },
    DividendTooLow { dividend: f64, minimum: f64 },
    OwnershipTooLow { ownership_percent: f64, minimum: f64 },
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::RevenueNotAboveCost {
                revenue,
                cost_of_revenue,
            } => write!(f, "revenue {revenue} <= cost of revenue {cost_of_revenue}"),
            FailReason::DividendTooLow { dividend, minimum } => {
                write!(f, "dividend {dividend} <= {minimum}")
            }
            FailReason::OwnershipTooLow {
                ownership_percent,
                minimum,
            } => write!(f, "institutional ownership {ownership_percent}% <= {minimum}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    Passed,
    Failed(Vec<FailReason>),
    /// At least one series was empty; the ticker is not considered this round.
    Skipped(Vec<SeriesKind>),
}

impl ScreenOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ScreenOutcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ScreenOutcome::Skipped(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScreenOutcome::Passed => "passed",
            ScreenOutcome::Failed(_) => "failed",
            ScreenOutcome::Skipped(_) => "skipped",
        }
    }

    /// Human-readable detail: failed checks or missing series.
    pub fn detail(&self) -> String {
        match self {
            ScreenOutcome::Passed => String::new(),
            ScreenOutcome::Failed(reasons) => reasons
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
            ScreenOutcome::Skipped(missing) => {
                let names: Vec<&str> = missing.iter().map(SeriesKind::as_str).collect();
                format!("no {} data", names.join(", "))
            }
        }
    }
}

/// Strict `value > bound`; false whenever either side is NaN.
fn exceeds(value: f64, bound: f64) -> bool {
    value > bound
}

impl ScreenCriteria {
    /// Checks one set of latest records. An empty result means the ticker passes.
    pub fn check(
        &self,
        statement: &FinancialStatementRecord,
        dividend: &DividendRecord,
        ownership: &InstitutionalOwnershipRecord,
    ) -> Vec<FailReason> {
        let mut reasons = Vec::new();
        if !exceeds(statement.revenue, statement.cost_of_revenue) {
            reasons.push(FailReason::RevenueNotAboveCost {
                revenue: statement.revenue,
                cost_of_revenue: statement.cost_of_revenue,
            });
        }
        if !exceeds(dividend.dividend, self.min_dividend) {
            reasons.push(FailReason::DividendTooLow {
                dividend: dividend.dividend,
                minimum: self.min_dividend,
            });
        }
        if !exceeds(ownership.ownership_percent, self.min_ownership_pct) {
            reasons.push(FailReason::OwnershipTooLow {
                ownership_percent: ownership.ownership_percent,
                minimum: self.min_ownership_pct,
            });
        }
        reasons
    }

    /// Screens `ticker` against the last record of each of its series.
    pub fn screen(&self, data: &FundamentalData, ticker: &str) -> ScreenOutcome {
        let (Some(statement), Some(dividend), Some(ownership)) = (
            data.financial_statements(ticker).last(),
            data.dividends(ticker).last(),
            data.institutional_ownership(ticker).last(),
        ) else {
            return ScreenOutcome::Skipped(data.missing_series(ticker));
        };

        let reasons = self.check(statement, dividend, ownership);
        if reasons.is_empty() {
            ScreenOutcome::Passed
        } else {
            ScreenOutcome::Failed(reasons)
        }
    }
}
