//! Human-readable console report.
//!
//! Streams one block per check as soon as it finishes, with emoji status
//! markers, followed by a one-line summary. Not meant for machine parsing;
//! use [`super::JsonReporter`] for that.

use std::io::{self, Write};

use serde_json::Value;
use smokeprobe_application::ports::{ReportSink, ReportSinkError};
use smokeprobe_domain::{
    BlockCapability, CheckDetail, CheckFailure, CheckKind, CheckOutcome, CheckRecord,
    RenderOutcome, RenderSummary, SmokeReport,
};

const PASS: &str = "✅";
const FAIL: &str = "❌";

/// Report sink printing human-readable text.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(kind: CheckKind) -> String {
        match kind {
            CheckKind::Readiness => format!("⏳ {}", kind.title()),
            CheckKind::Health => format!("[1/3] {}", kind.title()),
            CheckKind::CapabilityProbe => format!("[2/3] {}", kind.title()),
            CheckKind::RenderProbe => format!("[3/3] {}", kind.title()),
        }
    }

    fn write_detail(&mut self, detail: &CheckDetail) -> io::Result<()> {
        match detail {
            CheckDetail::Ready { attempts } => {
                writeln!(self.out, "{PASS} Service ready after {attempts} attempt(s)")
            }
            CheckDetail::Health { payload } => {
                writeln!(self.out, "{PASS} Health OK: {}", compact(payload))
            }
            CheckDetail::Capabilities { blocks } => {
                writeln!(self.out, "{PASS} Success")?;
                if blocks.is_empty() {
                    writeln!(self.out, "   (no blocks reported)")?;
                }
                for (name, block) in blocks {
                    self.write_block(name, block)?;
                }
                Ok(())
            }
            CheckDetail::Render { summary } => self.write_render(summary),
        }
    }

    fn write_block(&mut self, name: &str, block: &BlockCapability) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "📦 {name}:")?;
        writeln!(self.out, "   Found: {}", mark(block.found))?;
        writeln!(
            self.out,
            "   Render function: {}",
            mark(block.has_render_function)
        )?;
        writeln!(self.out, "   Props: {}", compact(&block.has_props))?;
        match &block.render {
            Some(RenderOutcome::Rendered(metrics)) => {
                writeln!(self.out, "   {PASS} Render OK")?;
                writeln!(
                    self.out,
                    "      HTML: {} ({} chars)",
                    mark(metrics.has_html),
                    metrics.html_length
                )?;
                writeln!(self.out, "      CSS: {} chars", metrics.css_length)
            }
            Some(RenderOutcome::Failed(error)) => {
                writeln!(self.out, "   {FAIL} Render error: {error}")
            }
            None => Ok(()),
        }
    }

    fn write_render(&mut self, summary: &RenderSummary) -> io::Result<()> {
        writeln!(self.out, "{PASS} Render succeeded")?;
        writeln!(self.out, "   Type: {}", summary.block_type)?;
        writeln!(self.out, "   HTML: {}", mark(summary.has_html))?;
        writeln!(self.out, "   CSS: {}", mark(summary.has_css))
    }

    fn write_failure(&mut self, failure: &CheckFailure) -> io::Result<()> {
        match failure {
            CheckFailure::HttpStatus { body, .. } => {
                writeln!(self.out, "{FAIL} {failure}")?;
                if let Some(body) = body {
                    writeln!(self.out, "   Error body: {}", compact(body))?;
                }
                Ok(())
            }
            CheckFailure::Application { message } => {
                writeln!(self.out, "{FAIL} Test failed: the service reported failure")?;
                if let Some(message) = message {
                    writeln!(self.out, "   Error: {message}")?;
                }
                Ok(())
            }
            CheckFailure::ReadinessTimeout { last_error, .. } => {
                writeln!(self.out, "{FAIL} {failure}")?;
                if let Some(error) = last_error {
                    writeln!(self.out, "   Last error: {error}")?;
                }
                writeln!(self.out, "   Running the checks anyway")
            }
            CheckFailure::Network { .. } | CheckFailure::MalformedBody { .. } => {
                writeln!(self.out, "{FAIL} Error: {failure}")
            }
        }
    }
}

impl<W: Write> ReportSink for ConsoleReporter<W> {
    fn begin(&mut self, report: &SmokeReport) -> Result<(), ReportSinkError> {
        writeln!(self.out, "🚀 Smoke testing V3 blocks at {}", report.target)?;
        Ok(())
    }

    fn record(&mut self, record: &CheckRecord) -> Result<(), ReportSinkError> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", Self::heading(record.kind))?;
        match &record.outcome {
            CheckOutcome::Passed(detail) => self.write_detail(detail)?,
            CheckOutcome::Failed(failure) => self.write_failure(failure)?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, report: &SmokeReport) -> Result<(), ReportSinkError> {
        writeln!(self.out)?;
        let marker = if report.all_passed() { PASS } else { FAIL };
        writeln!(
            self.out,
            "{marker} Summary: {} passed, {} failed ({}ms)",
            report.passed_count(),
            report.failed_count(),
            report.duration_ms
        )?;
        self.out.flush()?;
        Ok(())
    }
}

const fn mark(flag: bool) -> &'static str {
    if flag { PASS } else { FAIL }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}
