//! CSV allocation report.
//!
//! One row per screened ticker: `ticker,status,weight,detail`. Skipped tickers
//! have an empty weight since they are not part of the allocation.

use crate::domain::allocation::ScreenedAllocation;
use crate::domain::error::FundscreenError;
use crate::domain::strategy::DividendQualityStrategy;
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    /// Writes the report rows to any sink.
    pub fn write_to<W: Write>(
        &self,
        result: &ScreenedAllocation,
        sink: W,
    ) -> Result<(), FundscreenError> {
        let report_error = |e: csv::Error| FundscreenError::Report {
            reason: e.to_string(),
        };

        let mut wtr = csv::Writer::from_writer(sink);
        wtr.write_record(["ticker", "status", "weight", "detail"])
            .map_err(report_error)?;

        for entry in &result.outcomes {
            let weight = result
                .allocation
                .get(&entry.ticker)
                .map(|w| format!("{:.6}", w))
                .unwrap_or_default();
            wtr.write_record([
                entry.ticker.as_str(),
                entry.outcome.label(),
                weight.as_str(),
                entry.outcome.detail().as_str(),
            ])
            .map_err(report_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &ScreenedAllocation,
        strategy: &DividendQualityStrategy,
        output_path: &str,
    ) -> Result<(), FundscreenError> {
        let file = std::fs::File::create(output_path).map_err(|e| FundscreenError::Report {
            reason: format!("failed to create {}: {}", output_path, e),
        })?;
        log::info!(
            "writing {} report for {} tickers to {}",
            strategy.name,
            result.outcomes.len(),
            output_path
        );
        self.write_to(result, file)
    }
}
