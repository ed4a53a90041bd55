//! Check outcomes and the run report.
//!
//! Every step of a run produces a [`CheckRecord`] whose outcome is either a
//! passed detail or a classified failure. Failures are values, never
//! propagated errors, so one broken step cannot stop the next.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::probe::{BlockCapability, RenderSummary};
use crate::response::StatusCode;

/// The steps of a smoke run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Bounded wait for the health endpoint to answer.
    Readiness,
    /// `GET /api/health`.
    Health,
    /// `GET /api/test-v3`.
    CapabilityProbe,
    /// `POST /api/test-v3`.
    RenderProbe,
}

impl CheckKind {
    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Readiness => "Waiting for service",
            Self::Health => "Health check",
            Self::CapabilityProbe => "Block capabilities (GET /api/test-v3)",
            Self::RenderProbe => "Block render (POST /api/test-v3)",
        }
    }
}

/// What a passed check observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckDetail {
    /// The service answered the health endpoint.
    Ready {
        /// Number of polls it took.
        attempts: u32,
    },
    /// The health payload.
    Health {
        /// Body as returned by the service.
        payload: Value,
    },
    /// Per-block capabilities in server order.
    Capabilities {
        /// Block identifier to capability.
        blocks: IndexMap<String, BlockCapability>,
    },
    /// Summary of the trial render.
    Render {
        /// Render summary.
        summary: RenderSummary,
    },
}

/// Why a check failed.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckFailure {
    /// The request never produced a response.
    #[error("network error: {message}")]
    Network {
        /// Transport error message.
        message: String,
    },

    /// The service answered with a non-2xx status.
    #[error("HTTP {} {reason}", .status.as_u16())]
    HttpStatus {
        /// Status code.
        status: StatusCode,
        /// Reason phrase.
        reason: String,
        /// Error body, when it parsed as JSON.
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },

    /// The body was not JSON or had the wrong shape.
    #[error("malformed response: {message}")]
    MalformedBody {
        /// Decoder message.
        message: String,
    },

    /// The service answered `success: false`.
    #[error("service reported failure")]
    Application {
        /// Server-provided error message, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The service did not become ready in time.
    #[error("service not ready after {attempts} attempts ({elapsed_ms}ms)")]
    ReadinessTimeout {
        /// Polls made before giving up.
        attempts: u32,
        /// Time spent waiting.
        elapsed_ms: u64,
        /// Error of the last poll.
        #[serde(skip_serializing_if = "Option::is_none")]
        last_error: Option<String>,
    },
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The check passed.
    Passed(CheckDetail),
    /// The check failed.
    Failed(CheckFailure),
}

impl CheckOutcome {
    /// Returns true if the check passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed(_))
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&CheckFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Passed(_) => None,
        }
    }
}

impl From<Result<CheckDetail, CheckFailure>> for CheckOutcome {
    fn from(result: Result<CheckDetail, CheckFailure>) -> Self {
        match result {
            Ok(detail) => Self::Passed(detail),
            Err(failure) => Self::Failed(failure),
        }
    }
}

/// One finished check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRecord {
    /// Which step this is.
    pub kind: CheckKind,
    /// What happened.
    pub outcome: CheckOutcome,
    /// Wall time of the step.
    pub duration_ms: u64,
}

impl CheckRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(kind: CheckKind, outcome: CheckOutcome, duration_ms: u64) -> Self {
        Self {
            kind,
            outcome,
            duration_ms,
        }
    }

    /// Returns true if the check passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

/// Report of a whole smoke run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmokeReport {
    /// Base URL of the service under test.
    pub target: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Total wall time of the run.
    pub duration_ms: u64,
    /// Records in execution order.
    pub records: Vec<CheckRecord>,
}

impl SmokeReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(target: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            target: target.into(),
            started_at,
            duration_ms: 0,
            records: Vec::new(),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: CheckRecord) {
        self.records.push(record);
    }

    /// Returns the record for a step, if it ran.
    #[must_use]
    pub fn record(&self, kind: CheckKind) -> Option<&CheckRecord> {
        self.records.iter().find(|r| r.kind == kind)
    }

    /// Number of passed checks.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_passed()).count()
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.records.len() - self.passed_count()
    }

    /// Returns true if no check failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.records.iter().all(CheckRecord::is_passed)
    }
}
