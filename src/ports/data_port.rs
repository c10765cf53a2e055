//! Fundamental data access port.

use crate::domain::error::FundscreenError;
use crate::domain::fundamental_data::FundamentalData;
use crate::domain::records::{
    DividendRecord, FinancialStatementRecord, InstitutionalOwnershipRecord, SeriesKind,
};
use crate::domain::strategy::DataRequest;

/// Source of per-ticker fundamental series.
///
/// Every fetch returns records sorted oldest first. A ticker with no data
/// yields an empty vector, not an error; errors are reserved for unreadable
/// or malformed sources.
pub trait FundamentalDataPort {
    fn fetch_dividends(&self, ticker: &str) -> Result<Vec<DividendRecord>, FundscreenError>;

    fn fetch_financial_statements(
        &self,
        ticker: &str,
    ) -> Result<Vec<FinancialStatementRecord>, FundscreenError>;

    fn fetch_institutional_ownership(
        &self,
        ticker: &str,
    ) -> Result<Vec<InstitutionalOwnershipRecord>, FundscreenError>;

    fn list_tickers(&self) -> Result<Vec<String>, FundscreenError>;

    /// Gathers every requested series into one round of input.
    fn fetch_requests(&self, requests: &[DataRequest]) -> Result<FundamentalData, FundscreenError> {
        let mut data = FundamentalData::new();
        for request in requests {
            let ticker = request.ticker.as_str();
            match request.kind {
                SeriesKind::Dividend => {
                    data.insert_dividends(ticker, self.fetch_dividends(ticker)?)
                }
                SeriesKind::FinancialStatement => data
                    .insert_financial_statements(ticker, self.fetch_financial_statements(ticker)?),
                SeriesKind::InstitutionalOwnership => data.insert_institutional_ownership(
                    ticker,
                    self.fetch_institutional_ownership(ticker)?,
                ),
            }
        }
        Ok(data)
    }
}
