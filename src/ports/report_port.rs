//! Allocation report port.

use crate::domain::allocation::ScreenedAllocation;
use crate::domain::error::FundscreenError;
use crate::domain::strategy::DividendQualityStrategy;

/// Port for writing the result of a decision round.
pub trait ReportPort {
    fn write(
        &self,
        result: &ScreenedAllocation,
        strategy: &DividendQualityStrategy,
        output_path: &str,
    ) -> Result<(), FundscreenError>;
}
