//! Shared request/response handling for the checks.

use serde::de::DeserializeOwned;
use serde_json::Value;
use smokeprobe_domain::{CheckFailure, DomainError, RequestSpec, ResponseSpec};
use tracing::{debug, warn};

use crate::ports::HttpClient;

/// Sends a request and turns transport errors and non-2xx statuses into
/// check failures.
///
/// For an error status the body is kept when it parses as JSON and dropped
/// silently otherwise.
pub(crate) async fn send<C: HttpClient + ?Sized>(
    client: &C,
    request: &RequestSpec,
) -> Result<ResponseSpec, CheckFailure> {
    match client.execute(request).await {
        Ok(response) if response.is_success() => {
            debug!(
                method = %request.method,
                url = %request.url,
                status = response.status.as_u16(),
                duration_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
                "request succeeded"
            );
            Ok(response)
        }
        Ok(response) => {
            let body = serde_json::from_slice::<Value>(&response.body).ok();
            warn!(
                method = %request.method,
                url = %request.url,
                status = response.status.as_u16(),
                "request returned error status"
            );
            Err(CheckFailure::HttpStatus {
                status: response.status,
                reason: response.reason,
                body,
            })
        }
        Err(error) => {
            warn!(method = %request.method, url = %request.url, %error, "request failed");
            Err(CheckFailure::Network {
                message: error.to_string(),
            })
        }
    }
}

/// Decodes a JSON body, classifying problems as a malformed body.
pub(crate) fn decode<T: DeserializeOwned>(
    response: &ResponseSpec,
) -> Result<T, CheckFailure> {
    response.json().map_err(|error| CheckFailure::MalformedBody {
        message: match error {
            DomainError::MalformedBody(message) => message,
            other => other.to_string(),
        },
    })
}
