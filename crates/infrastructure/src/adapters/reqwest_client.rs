//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication with the service under test.

use std::error::Error as _;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use smokeprobe_application::ports::{HttpClient, HttpClientError, ResponseFuture};
use smokeprobe_domain::{HttpMethod, RequestSpec, ResponseSpec};
use tracing::trace;

const USER_AGENT: &str = concat!("smokeprobe/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer. Timeouts are set per request from `RequestSpec`.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "smokeprobe/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Renders an error with its whole source chain.
    ///
    /// reqwest's top-level message only names the URL; the cause
    /// ("Connection refused", "failed to lookup address") sits in the chain.
    fn error_chain(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = Self::error_chain(error);
        let host = || {
            error
                .url()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string())
        };

        if error.is_connect() {
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") || lowered.contains("lookup") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::Other(format!("too many redirects (max {MAX_REDIRECTS})"));
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> ResponseFuture<'_> {
        // Clone what we need to move into the async block
        let method = request.method;
        let url = request.url.clone();
        let timeout_ms = request.timeout_ms;
        let body = request.body_bytes();

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;
            let body = body.map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url)
                .timeout(Duration::from_millis(timeout_ms));

            if let Some(bytes) = body {
                builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
            }

            trace!(%method, %url, timeout_ms, "sending request");
            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status();
            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?
                .to_vec();
            let duration = start.elapsed();

            let spec = ResponseSpec::new(status.as_u16(), body_bytes, duration);
            Ok(match status.canonical_reason() {
                Some(reason) => spec.with_reason(reason),
                None => spec,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new().expect("client");
        let request = RequestSpec::get(format!("{}/api/health", server.uri()));
        let response = client.execute(&request).await.expect("response");

        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.reason, "OK");
        assert_eq!(response.text(), r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/test-v3"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"blockType": "hero"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new().expect("client");
        let request = RequestSpec::post_json(
            format!("{}/api/test-v3", server.uri()),
            json!({"blockType": "hero"}),
        );
        let response = client.execute(&request).await.expect("response");

        assert_eq!(response.status.as_u16(), 201);
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new().expect("client");
        let request = RequestSpec::get(format!("{}/api/test-v3", server.uri()));
        let response = client.execute(&request).await.expect("response");

        assert_eq!(response.status.as_u16(), 500);
        assert_eq!(response.reason, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = ReqwestHttpClient::new().expect("client");
        let request = RequestSpec::get(format!("{}/api/health", server.uri())).with_timeout_ms(50);
        let result = client.execute(&request).await;

        assert_eq!(result, Err(HttpClientError::Timeout { timeout_ms: 50 }));
    }

    #[tokio::test]
    async fn test_closed_port_is_a_connection_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };

        let client = ReqwestHttpClient::new().expect("client");
        let request = RequestSpec::get(format!("http://127.0.0.1:{port}/api/health"));
        let result = client.execute(&request).await;

        assert!(matches!(
            result,
            Err(HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = ReqwestHttpClient::new().expect("client");
        let request = RequestSpec::get("not a url");
        let result = client.execute(&request).await;
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }
}
