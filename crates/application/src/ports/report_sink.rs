//! Report output port

use smokeprobe_domain::{CheckRecord, SmokeReport};
use thiserror::Error;

/// Port receiving the progress and final report of a run.
///
/// `record` is called as soon as each check finishes, so a console sink can
/// stream its output; `finish` is called once with the complete report.
pub trait ReportSink {
    /// Called once before the first check runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn begin(&mut self, report: &SmokeReport) -> Result<(), ReportSinkError> {
        let _ = report;
        Ok(())
    }

    /// Called after each check.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn record(&mut self, record: &CheckRecord) -> Result<(), ReportSinkError>;

    /// Called once with the complete report.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn finish(&mut self, report: &SmokeReport) -> Result<(), ReportSinkError>;
}

/// Errors writing a report.
#[derive(Debug, Error)]
pub enum ReportSinkError {
    /// The underlying writer failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
