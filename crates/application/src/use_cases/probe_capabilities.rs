//! Probe Capabilities Use Case

use std::sync::Arc;

use smokeprobe_domain::{
    CapabilityProbeResponse, CheckDetail, CheckFailure, EndpointTarget, RequestSpec,
};
use tracing::debug;

use super::exchange::{decode, send};
use crate::ports::HttpClient;

/// Use case for `GET /api/test-v3`, the block registry inspection.
pub struct ProbeCapabilities<C: HttpClient + ?Sized> {
    client: Arc<C>,
    request_timeout_ms: u64,
}

impl<C: HttpClient + ?Sized> ProbeCapabilities<C> {
    /// Creates the use case.
    pub const fn new(client: Arc<C>, request_timeout_ms: u64) -> Self {
        Self {
            client,
            request_timeout_ms,
        }
    }

    /// Runs the probe.
    ///
    /// # Errors
    ///
    /// Returns an application failure when the service answers
    /// `success: false`, otherwise a transport or decoding failure.
    pub async fn execute(&self, target: &EndpointTarget) -> Result<CheckDetail, CheckFailure> {
        let request =
            RequestSpec::get(target.test_v3_url()).with_timeout_ms(self.request_timeout_ms);
        let response = send(self.client.as_ref(), &request).await?;
        let probe: CapabilityProbeResponse = decode(&response)?;

        if !probe.success {
            return Err(CheckFailure::Application {
                message: probe.error,
            });
        }

        debug!(blocks = probe.results.len(), "capability probe decoded");
        Ok(CheckDetail::Capabilities {
            blocks: probe.results,
        })
    }
}
