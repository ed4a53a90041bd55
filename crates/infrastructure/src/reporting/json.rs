//! Machine-readable JSON report.

use std::io::{self, Write};

use smokeprobe_application::ports::{ReportSink, ReportSinkError};
use smokeprobe_domain::{CheckRecord, SmokeReport};
use tracing::debug;

use crate::serialization::to_json_stable;

/// Report sink printing the whole report as one JSON document at the end.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl JsonReporter<io::Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReporter<W> {
    fn record(&mut self, record: &CheckRecord) -> Result<(), ReportSinkError> {
        debug!(kind = ?record.kind, passed = record.is_passed(), "check finished");
        Ok(())
    }

    fn finish(&mut self, report: &SmokeReport) -> Result<(), ReportSinkError> {
        let json =
            to_json_stable(report).map_err(|e| ReportSinkError::Serialization(e.to_string()))?;
        self.out.write_all(json.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
