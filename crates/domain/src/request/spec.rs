//! Request specification type

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HttpMethod;
use crate::error::{DomainError, DomainResult};

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Specification for one HTTP call made by the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// JSON body, sent with `Content-Type: application/json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_body: Option<Value>,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            json_body: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Creates a POST request carrying a JSON body.
    #[must_use]
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            json_body: Some(body),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Serializes the JSON body, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a body is attached to a method that does not
    /// carry one, or if serialization fails.
    pub fn body_bytes(&self) -> DomainResult<Option<Vec<u8>>> {
        match &self.json_body {
            None => Ok(None),
            Some(_) if !self.method.has_body() => Err(DomainError::InvalidBody(format!(
                "{} requests cannot carry a body",
                self.method
            ))),
            Some(value) => serde_json::to_vec(value)
                .map(Some)
                .map_err(|e| DomainError::InvalidBody(e.to_string())),
        }
    }
}
