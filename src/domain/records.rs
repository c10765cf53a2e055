//! Fundamental data records and the series they belong to.
//!
//! Records are validated when they are ingested (CSV, SQLite); by the time
//! the allocation decision sees them every numeric field is present and
//! finite.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// The three fundamental data series requested per ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKind {
    Dividend,
    FinancialStatement,
    InstitutionalOwnership,
}

impl SeriesKind {
    /// Request order: dividends, financial statements, institutional ownership.
    pub const ALL: [SeriesKind; 3] = [
        SeriesKind::Dividend,
        SeriesKind::FinancialStatement,
        SeriesKind::InstitutionalOwnership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Dividend => "dividend",
            SeriesKind::FinancialStatement => "financial_statement",
            SeriesKind::InstitutionalOwnership => "institutional_ownership",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of one fundamental series.
pub trait SeriesRecord {
    fn date(&self) -> NaiveDate;

    /// False if any numeric field is NaN or infinite.
    fn is_finite(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DividendRecord {
    pub date: NaiveDate,
    pub dividend: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatementRecord {
    pub date: NaiveDate,
    pub revenue: f64,
    pub cost_of_revenue: f64,
}

/// `ownership_percent` is on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionalOwnershipRecord {
    pub date: NaiveDate,
    pub ownership_percent: f64,
}

impl SeriesRecord for DividendRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn is_finite(&self) -> bool {
        self.dividend.is_finite()
    }
}

impl SeriesRecord for FinancialStatementRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn is_finite(&self) -> bool {
        self.revenue.is_finite() && self.cost_of_revenue.is_finite()
    }
}

impl SeriesRecord for InstitutionalOwnershipRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn is_finite(&self) -> bool {
        self.ownership_percent.is_finite()
    }
}
