//! Settings of a smoke run.
//!
//! The binary collects raw values from flags and environment variables into
//! [`RawSettings`]; [`Settings::try_from`] validates them before any request
//! is made.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;
use smokeprobe_application::{ReadinessPolicy, SmokeOptions};
use smokeprobe_domain::probe::{DEFAULT_BLOCK_TYPE, default_props};
use smokeprobe_domain::request::DEFAULT_TIMEOUT_MS;
use smokeprobe_domain::target::DEFAULT_BASE_URL;
use smokeprobe_domain::{DomainError, EndpointTarget, RenderRequest, SmokeReport};
use thiserror::Error;

use crate::serialization::from_json;

/// Default readiness budget, the length of the old fixed warm-up pause.
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 5_000;

/// Exit code for invalid configuration.
pub const CONFIG_ERROR_EXIT_CODE: u8 = 2;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The base URL is not a usable http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] DomainError),

    /// The render props are not valid JSON.
    #[error("invalid render props: {0}")]
    InvalidProps(String),

    /// The render props are valid JSON but not an object.
    #[error("render props must be a JSON object")]
    PropsNotObject,

    /// The render block type is empty.
    #[error("block type must not be empty")]
    EmptyBlockType,

    /// The per-request timeout is zero.
    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    /// The output format is unknown.
    #[error("unknown output format '{0}', expected 'text' or 'json'")]
    UnknownFormat(String),
}

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text, streamed per check.
    #[default]
    Text,
    /// One JSON document at the end.
    Json,
}

impl FromStr for OutputFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(SettingsError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Unvalidated settings as collected from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RawSettings {
    /// Base URL of the service under test.
    pub base_url: String,
    /// Readiness budget in milliseconds.
    pub ready_timeout_ms: u64,
    /// Skip the readiness wait.
    pub no_wait: bool,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Block type for the render probe.
    pub block_type: String,
    /// Render props as a JSON object literal; `None` for the defaults.
    pub props: Option<String>,
    /// Output format.
    pub format: OutputFormat,
    /// Exit non-zero when a check fails.
    pub strict: bool,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            no_wait: false,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            block_type: DEFAULT_BLOCK_TYPE.to_string(),
            props: None,
            format: OutputFormat::Text,
            strict: false,
        }
    }
}

/// Validated settings of a smoke run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Service under test.
    pub target: EndpointTarget,
    /// Options passed to the run.
    pub options: SmokeOptions,
    /// Output format.
    pub format: OutputFormat,
    /// Exit non-zero when a check fails.
    pub strict: bool,
}

impl Settings {
    /// Process exit code for a finished run.
    ///
    /// Advisory by default: always 0. In strict mode any failed check
    /// gives 1.
    #[must_use]
    pub fn exit_code(&self, report: &SmokeReport) -> u8 {
        u8::from(self.strict && !report.all_passed())
    }

    fn parse_props(raw: Option<&str>) -> Result<Value, SettingsError> {
        let Some(raw) = raw else {
            return Ok(default_props());
        };
        let value: Value = from_json(raw).map_err(|e| SettingsError::InvalidProps(e.to_string()))?;
        if value.is_object() {
            Ok(value)
        } else {
            Err(SettingsError::PropsNotObject)
        }
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let target = EndpointTarget::parse(&raw.base_url)?;

        if raw.request_timeout_ms == 0 {
            return Err(SettingsError::ZeroRequestTimeout);
        }

        let block_type = raw.block_type.trim();
        if block_type.is_empty() {
            return Err(SettingsError::EmptyBlockType);
        }
        let props = Self::parse_props(raw.props.as_deref())?;

        let readiness = (!raw.no_wait).then(|| {
            ReadinessPolicy::with_timeout(Duration::from_millis(raw.ready_timeout_ms))
        });

        Ok(Self {
            target,
            options: SmokeOptions {
                readiness,
                request_timeout_ms: raw.request_timeout_ms,
                render: RenderRequest::new(block_type, props),
            },
            format: raw.format,
            strict: raw.strict,
        })
    }
}
