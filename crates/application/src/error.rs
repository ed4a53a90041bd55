//! Application error types

use smokeprobe_domain::DomainError;
use thiserror::Error;

use crate::ports::ReportSinkError;

/// Application-level errors.
///
/// Check failures are not errors: they are recorded in the report. These
/// are the conditions that stop a run altogether.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The report could not be written.
    #[error("report error: {0}")]
    Report(#[from] ReportSinkError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
