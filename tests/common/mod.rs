#![allow(dead_code)]

use chrono::NaiveDate;
use fundscreen::domain::error::FundscreenError;
use fundscreen::domain::records::{
    DividendRecord, FinancialStatementRecord, InstitutionalOwnershipRecord,
};
use fundscreen::ports::data_port::FundamentalDataPort;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Default)]
pub struct MockDataPort {
    pub dividends: HashMap<String, Vec<DividendRecord>>,
    pub statements: HashMap<String, Vec<FinancialStatementRecord>>,
    pub ownership: HashMap<String, Vec<InstitutionalOwnershipRecord>>,
    pub errors: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// One record in each series, all dated `date`.
    pub fn with_fundamentals(
        mut self,
        ticker: &str,
        date: NaiveDate,
        revenue: f64,
        cost_of_revenue: f64,
        dividend: f64,
        ownership_percent: f64,
    ) -> Self {
        self.dividends
            .entry(ticker.to_string())
            .or_default()
            .push(DividendRecord { date, dividend });
        self.statements
            .entry(ticker.to_string())
            .or_default()
            .push(FinancialStatementRecord {
                date,
                revenue,
                cost_of_revenue,
            });
        self.ownership
            .entry(ticker.to_string())
            .or_default()
            .push(InstitutionalOwnershipRecord {
                date,
                ownership_percent,
            });
        self
    }

    pub fn passing(self, ticker: &str) -> Self {
        self.with_fundamentals(ticker, date(2024, 6, 30), 100.0, 60.0, 0.5, 65.0)
    }

    pub fn failing(self, ticker: &str) -> Self {
        self.with_fundamentals(ticker, date(2024, 6, 30), 100.0, 120.0, 0.5, 65.0)
    }

    pub fn without_dividends(mut self, ticker: &str) -> Self {
        self.dividends.insert(ticker.to_string(), Vec::new());
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    fn check(&self, ticker: &str, series: &str) -> Result<(), FundscreenError> {
        self.calls.borrow_mut().push(format!("{series}:{ticker}"));
        match self.errors.get(ticker) {
            Some(reason) => Err(FundscreenError::Data {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl FundamentalDataPort for MockDataPort {
    fn fetch_dividends(&self, ticker: &str) -> Result<Vec<DividendRecord>, FundscreenError> {
        self.check(ticker, "dividend")?;
        Ok(self.dividends.get(ticker).cloned().unwrap_or_default())
    }

    fn fetch_financial_statements(
        &self,
        ticker: &str,
    ) -> Result<Vec<FinancialStatementRecord>, FundscreenError> {
        self.check(ticker, "financial_statement")?;
        Ok(self.statements.get(ticker).cloned().unwrap_or_default())
    }

    fn fetch_institutional_ownership(
        &self,
        ticker: &str,
    ) -> Result<Vec<InstitutionalOwnershipRecord>, FundscreenError> {
        self.check(ticker, "institutional_ownership")?;
        Ok(self.ownership.get(ticker).cloned().unwrap_or_default())
    }

    fn list_tickers(&self) -> Result<Vec<String>, FundscreenError> {
        let mut tickers: Vec<String> = self
            .dividends
            .keys()
            .chain(self.statements.keys())
            .chain(self.ownership.keys())
            .cloned()
            .collect();
        tickers.sort();
        tickers.dedup();
        Ok(tickers)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn default_tickers() -> Vec<String> {
    ["AAPL", "MSFT", "JNJ", "XOM"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
