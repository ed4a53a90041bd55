//! Check Health Use Case

use std::sync::Arc;

use serde_json::Value;
use smokeprobe_domain::{CheckDetail, CheckFailure, EndpointTarget, RequestSpec};

use super::exchange::{decode, send};
use crate::ports::HttpClient;

/// Use case for `GET /api/health`.
///
/// Any valid JSON body passes; the payload is reported as returned.
pub struct CheckHealth<C: HttpClient + ?Sized> {
    client: Arc<C>,
    request_timeout_ms: u64,
}

impl<C: HttpClient + ?Sized> CheckHealth<C> {
    /// Creates the use case.
    pub const fn new(client: Arc<C>, request_timeout_ms: u64) -> Self {
        Self {
            client,
            request_timeout_ms,
        }
    }

    /// Runs the health check.
    ///
    /// # Errors
    ///
    /// Returns a network, HTTP status or malformed body failure.
    pub async fn execute(&self, target: &EndpointTarget) -> Result<CheckDetail, CheckFailure> {
        let request = RequestSpec::get(target.health_url()).with_timeout_ms(self.request_timeout_ms);
        let response = send(self.client.as_ref(), &request).await?;
        let payload: Value = decode(&response)?;
        Ok(CheckDetail::Health { payload })
    }
}
