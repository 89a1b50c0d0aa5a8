//! CLI-specific error types and exit code mapping

use depcheck_allowlist::AllowListStoreError;
use depcheck_core::error::{AllowListError, DepcheckError, ReportError, StoreError};
use depcheck_report::DependencyReportError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// An allow-list invariant rejected the change.
    #[error("rejected: {0}")]
    Validation(String),

    /// Snapshot, scan result or license does not exist.
    #[error("not found: {0}")]
    MissingData(String),

    /// The stored document changed since it was read.
    #[error("concurrent modification: {0}")]
    Conflict(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file write, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other domain error from depcheck-core.
    #[error("{0}")]
    Core(DepcheckError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                 |
    /// |------|-----------------------------------------|
    /// | 0    | Success                                 |
    /// | 1    | General / command error                 |
    /// | 2    | Configuration error                     |
    /// | 3    | Allow-list change rejected              |
    /// | 4    | Snapshot / scan result / license missing |
    /// | 5    | Concurrent modification                 |
    /// | 10   | IO error                                |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Validation(_) => 3,
            Self::MissingData(_) => 4,
            Self::Conflict(_) => 5,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<DepcheckError> for CliError {
    fn from(e: DepcheckError) -> Self {
        match e {
            DepcheckError::Config(err) => Self::Config(err.to_string()),
            DepcheckError::Report(ReportError::NotFound(id)) => {
                Self::MissingData(format!("snapshot {id}"))
            }
            DepcheckError::Report(ReportError::MissingScanResult(id)) => {
                Self::MissingData(format!("scan result for snapshot {id}"))
            }
            DepcheckError::AllowList(AllowListError::Validation(msg)) => Self::Validation(msg),
            DepcheckError::AllowList(AllowListError::NotFound(msg)) => Self::MissingData(msg),
            DepcheckError::AllowList(AllowListError::Conflict(msg)) => Self::Conflict(msg),
            DepcheckError::Store(err @ StoreError::Conflict { .. }) => Self::Conflict(err.to_string()),
            DepcheckError::Io(err) => Self::Io(err),
            other => Self::Core(other),
        }
    }
}

impl From<DependencyReportError> for CliError {
    fn from(e: DependencyReportError) -> Self {
        DepcheckError::from(e).into()
    }
}

impl From<AllowListStoreError> for CliError {
    fn from(e: AllowListStoreError) -> Self {
        DepcheckError::from(e).into()
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        DepcheckError::from(e).into()
    }
}
