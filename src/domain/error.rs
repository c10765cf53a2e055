//! Crate-level error types and their process exit codes.

use crate::domain::universe::UniverseError;

/// Top-level error type for fundscreen.
///
/// The allocation decision itself never fails; these errors come from the
/// surrounding ingestion, configuration and reporting layers.
#[derive(Debug, thiserror::Error)]
pub enum FundscreenError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("data query error: {reason}")]
    DataQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FundscreenError {
    /// Numeric exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            FundscreenError::Io(_) | FundscreenError::Report { .. } => 1,
            FundscreenError::ConfigParse { .. }
            | FundscreenError::ConfigMissing { .. }
            | FundscreenError::ConfigInvalid { .. } => 2,
            FundscreenError::Data { .. } | FundscreenError::DataQuery { .. } => 3,
            FundscreenError::Universe(_) => 4,
        }
    }
}

impl From<&FundscreenError> for std::process::ExitCode {
    fn from(err: &FundscreenError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
