//! Target service location.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Path of the liveness endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Path of the block capability and render probe endpoint.
pub const TEST_V3_PATH: &str = "/api/test-v3";

/// The base URL of the service under test.
///
/// Any path on the base URL is kept as a prefix, so a service mounted at
/// `http://host/studio` is probed at `http://host/studio/api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointTarget {
    base: Url,
}

impl EndpointTarget {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or not http(s).
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUrl("URL is required".to_string()));
        }

        let base = Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {trimmed}")))?;
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(DomainError::UnsupportedScheme(other.to_string())),
        }
        if base.host_str().is_none() {
            return Err(DomainError::InvalidUrl(format!("missing host: {trimmed}")));
        }

        Ok(Self { base })
    }

    /// Returns the base URL as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// Builds the absolute URL for an endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// URL of the health endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        self.endpoint(HEALTH_PATH)
    }

    /// URL of the test-v3 endpoint.
    #[must_use]
    pub fn test_v3_url(&self) -> String {
        self.endpoint(TEST_V3_PATH)
    }
}

impl Default for EndpointTarget {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!()),
        }
    }
}

impl fmt::Display for EndpointTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str().trim_end_matches('/'))
    }
}
