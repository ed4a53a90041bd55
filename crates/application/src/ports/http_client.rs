//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use smokeprobe_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;

/// Boxed future returned by [`HttpClient::execute`].
pub type ResponseFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// Any status code is a response; only transport-level problems
    /// are errors.
    fn execute(&self, request: &RequestSpec) -> ResponseFuture<'_>;
}

/// Transport-level failures of an HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// Nothing is listening on the target port.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be built.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}
