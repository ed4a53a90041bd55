//! Probe Render Use Case

use std::sync::Arc;

use smokeprobe_domain::{
    CheckDetail, CheckFailure, EndpointTarget, RenderRequest, RenderResponse, RequestSpec,
};

use super::exchange::{decode, send};
use crate::ports::HttpClient;

/// Use case for `POST /api/test-v3`, a trial render of one block.
pub struct ProbeRender<C: HttpClient + ?Sized> {
    client: Arc<C>,
    render: RenderRequest,
    request_timeout_ms: u64,
}

impl<C: HttpClient + ?Sized> ProbeRender<C> {
    /// Creates the use case for the given render request.
    pub const fn new(client: Arc<C>, render: RenderRequest, request_timeout_ms: u64) -> Self {
        Self {
            client,
            render,
            request_timeout_ms,
        }
    }

    /// Runs the trial render.
    ///
    /// # Errors
    ///
    /// Returns an application failure when the service answers
    /// `success: false`, a malformed body failure when a successful answer
    /// has no `result`, otherwise a transport failure.
    pub async fn execute(&self, target: &EndpointTarget) -> Result<CheckDetail, CheckFailure> {
        let body = serde_json::to_value(&self.render).map_err(|e| CheckFailure::MalformedBody {
            message: format!("render request: {e}"),
        })?;
        let request = RequestSpec::post_json(target.test_v3_url(), body)
            .with_timeout_ms(self.request_timeout_ms);
        let response = send(self.client.as_ref(), &request).await?;
        let rendered: RenderResponse = decode(&response)?;

        if !rendered.success {
            return Err(CheckFailure::Application {
                message: rendered.error,
            });
        }

        rendered
            .result
            .map(|summary| CheckDetail::Render { summary })
            .ok_or_else(|| CheckFailure::MalformedBody {
                message: "successful render without a result".to_string(),
            })
    }
}
