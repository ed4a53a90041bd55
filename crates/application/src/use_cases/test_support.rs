//! Scripted HTTP client for use case tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use smokeprobe_domain::{HttpMethod, RequestSpec, ResponseSpec};

use crate::ports::{HttpClient, HttpClientError, ResponseFuture};

type Scripted = Result<ResponseSpec, HttpClientError>;

struct Route {
    method: HttpMethod,
    path: String,
    responses: VecDeque<Scripted>,
}

/// Mock HTTP client answering by method and path suffix.
///
/// Each route replays its responses in order and repeats the last one.
/// Unrouted requests fail with a refused connection.
pub(crate) struct MockHttpClient {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl MockHttpClient {
    pub(crate) fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn on(self, method: HttpMethod, path: &str, response: Scripted) -> Self {
        self.on_sequence(method, path, vec![response])
    }

    pub(crate) fn on_sequence(self, method: HttpMethod, path: &str, responses: Vec<Scripted>) -> Self {
        self.routes.lock().expect("routes lock").push(Route {
            method,
            path: path.to_string(),
            responses: responses.into(),
        });
        self
    }

    pub(crate) fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn answer(&self, request: &RequestSpec) -> Scripted {
        let mut routes = self.routes.lock().expect("routes lock");
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && request.url.ends_with(&r.path));

        match route {
            Some(route) if route.responses.len() > 1 => route
                .responses
                .pop_front()
                .expect("non-empty response queue"),
            Some(route) => route
                .responses
                .front()
                .cloned()
                .expect("route has a response"),
            None => Err(HttpClientError::ConnectionRefused {
                host: "mock".to_string(),
                port: 0,
            }),
        }
    }
}

impl HttpClient for MockHttpClient {
    fn execute(&self, request: &RequestSpec) -> ResponseFuture<'_> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        let result = self.answer(request);
        Box::pin(async move { result })
    }
}

pub(crate) fn json_response(status: u16, body: Value) -> Scripted {
    Ok(ResponseSpec::new(
        status,
        serde_json::to_vec(&body).expect("serializable"),
        Duration::from_millis(5),
    ))
}

pub(crate) fn text_response(status: u16, body: &str) -> Scripted {
    Ok(ResponseSpec::new(
        status,
        body.as_bytes().to_vec(),
        Duration::from_millis(5),
    ))
}
