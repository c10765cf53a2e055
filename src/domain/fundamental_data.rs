//! One round of fundamental input, keyed by (series kind, ticker).

use crate::domain::records::{
    DividendRecord, FinancialStatementRecord, InstitutionalOwnershipRecord, SeriesKind,
    SeriesRecord,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Ordered (oldest first) records for every requested `(SeriesKind, ticker)`.
///
/// An absent key reads as an empty series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundamentalData {
    dividends: HashMap<String, Vec<DividendRecord>>,
    financial_statements: HashMap<String, Vec<FinancialStatementRecord>>,
    institutional_ownership: HashMap<String, Vec<InstitutionalOwnershipRecord>>,
}

impl FundamentalData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_dividends(&mut self, ticker: &str, records: Vec<DividendRecord>) {
        self.dividends.insert(ticker.to_string(), records);
    }

    pub fn insert_financial_statements(
        &mut self,
        ticker: &str,
        records: Vec<FinancialStatementRecord>,
    ) {
        self.financial_statements.insert(ticker.to_string(), records);
    }

    pub fn insert_institutional_ownership(
        &mut self,
        ticker: &str,
        records: Vec<InstitutionalOwnershipRecord>,
    ) {
        self.institutional_ownership.insert(ticker.to_string(), records);
    }

    pub fn with_dividends(mut self, ticker: &str, records: Vec<DividendRecord>) -> Self {
        self.insert_dividends(ticker, records);
        self
    }

    pub fn with_financial_statements(
        mut self,
        ticker: &str,
        records: Vec<FinancialStatementRecord>,
    ) -> Self {
        self.insert_financial_statements(ticker, records);
        self
    }

    pub fn with_institutional_ownership(
        mut self,
        ticker: &str,
        records: Vec<InstitutionalOwnershipRecord>,
    ) -> Self {
        self.insert_institutional_ownership(ticker, records);
        self
    }

    pub fn dividends(&self, ticker: &str) -> &[DividendRecord] {
        self.dividends
            .get(ticker)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn financial_statements(&self, ticker: &str) -> &[FinancialStatementRecord] {
        self.financial_statements
            .get(ticker)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn institutional_ownership(&self, ticker: &str) -> &[InstitutionalOwnershipRecord] {
        self.institutional_ownership
            .get(ticker)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn series_len(&self, kind: SeriesKind, ticker: &str) -> usize {
        match kind {
            SeriesKind::Dividend => self.dividends(ticker).len(),
            SeriesKind::FinancialStatement => self.financial_statements(ticker).len(),
            SeriesKind::InstitutionalOwnership => self.institutional_ownership(ticker).len(),
        }
    }

    /// Date of the last record in the series, which is the one the screen reads.
    pub fn latest_date(&self, kind: SeriesKind, ticker: &str) -> Option<NaiveDate> {
        match kind {
            SeriesKind::Dividend => self.dividends(ticker).last().map(SeriesRecord::date),
            SeriesKind::FinancialStatement => {
                self.financial_statements(ticker).last().map(SeriesRecord::date)
            }
            SeriesKind::InstitutionalOwnership => {
                self.institutional_ownership(ticker).last().map(SeriesRecord::date)
            }
        }
    }

    /// Series that are absent or empty for `ticker`, in request order.
    pub fn missing_series(&self, ticker: &str) -> Vec<SeriesKind> {
        SeriesKind::ALL
            .into_iter()
            .filter(|&kind| self.series_len(kind, ticker) == 0)
            .collect()
    }

    /// A copy holding only records dated on or before `date`.
    pub fn as_of(&self, date: NaiveDate) -> Self {
        Self {
            dividends: truncate_after(&self.dividends, date),
            financial_statements: truncate_after(&self.financial_statements, date),
            institutional_ownership: truncate_after(&self.institutional_ownership, date),
        }
    }
}

fn truncate_after<T: SeriesRecord + Clone>(
    series: &HashMap<String, Vec<T>>,
    date: NaiveDate,
) -> HashMap<String, Vec<T>> {
    series
        .iter()
        .map(|(ticker, records)| {
            let kept = records
                .iter()
                .filter(|r| r.date() <= date)
                .cloned()
                .collect();
            (ticker.clone(), kept)
        })
        .collect()
}
