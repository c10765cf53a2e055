//! CSV directory data adapter.
//!
//! Each series lives in its own file, `<TICKER>_<kind>.csv`:
//!
//! - `AAPL_dividend.csv`: `date,dividend`
//! - `AAPL_financial_statement.csv`: `date,revenue,costOfRevenue`
//! - `AAPL_institutional_ownership.csv`: `date,ownershipPercent`

use crate::domain::error::FundscreenError;
use crate::domain::records::{
    DividendRecord, FinancialStatementRecord, InstitutionalOwnershipRecord, SeriesKind,
    SeriesRecord,
};
use crate::ports::data_port::FundamentalDataPort;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn series_path(&self, ticker: &str, kind: SeriesKind) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", ticker, kind))
    }

    fn read_series<T: DeserializeOwned + SeriesRecord>(
        &self,
        ticker: &str,
        kind: SeriesKind,
    ) -> Result<Vec<T>, FundscreenError> {
        let path = self.series_path(ticker, kind);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| FundscreenError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut records: Vec<T> = Vec::new();
        for (row, result) in rdr.deserialize().enumerate() {
            let record: T = result.map_err(|e| FundscreenError::Data {
                reason: format!("{}: {}", path.display(), e),
            })?;
            if !record.is_finite() {
                return Err(FundscreenError::Data {
                    reason: format!(
                        "{}: record {} has a non-finite value",
                        path.display(),
                        row + 1
                    ),
                });
            }
            records.push(record);
        }

        records.sort_by_key(|r| r.date());
        Ok(records)
    }
}

impl FundamentalDataPort for CsvAdapter {
    fn fetch_dividends(&self, ticker: &str) -> Result<Vec<DividendRecord>, FundscreenError> {
        self.read_series(ticker, SeriesKind::Dividend)
    }

    fn fetch_financial_statements(
        &self,
        ticker: &str,
    ) -> Result<Vec<FinancialStatementRecord>, FundscreenError> {
        self.read_series(ticker, SeriesKind::FinancialStatement)
    }

    fn fetch_institutional_ownership(
        &self,
        ticker: &str,
    ) -> Result<Vec<InstitutionalOwnershipRecord>, FundscreenError> {
        self.read_series(ticker, SeriesKind::InstitutionalOwnership)
    }

    fn list_tickers(&self) -> Result<Vec<String>, FundscreenError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| FundscreenError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = BTreeSet::new();

        for entry in entries {
            let entry = entry.map_err(|e| FundscreenError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            for kind in SeriesKind::ALL {
                let suffix = format!("_{}.csv", kind);
                if let Some(ticker) = name_str.strip_suffix(&suffix) {
                    if !ticker.is_empty() {
                        tickers.insert(ticker.to_string());
                    }
                }
            }
        }

        Ok(tickers.into_iter().collect())
    }
}
