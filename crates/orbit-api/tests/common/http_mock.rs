//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing of the Orbit API.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/info")
//!         .with_header("X-Orbit-API-Key", "test-key")
//!         .respond_with_json(json!({"plan": "free"}))
//!         .mount()
//!         .await;
//!
//!     let client = HttpOrbitClient::with_base_url(server.url(), "test-key");
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`, optionally `.with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` and `server.verify().await`

use std::time::Duration;

use serde_json::Value;
pub use wiremock::matchers::{body_string_contains, header, method, path};
pub use wiremock::MockServer as WiremockServer;
pub use wiremock::{Mock, Request, ResponseTemplate};

/// A running stub server.
pub struct MockHttpServer {
    server: WiremockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: WiremockServer::start().await,
        }
    }

    /// Base URL to hand to the client under test.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Underlying wiremock server, for matchers this wrapper doesn't cover.
    pub const fn inner(&self) -> &WiremockServer {
        &self.server
    }

    pub fn expect_get(&self, request_path: &str) -> StubBuilder<'_> {
        StubBuilder::new(&self.server, "GET", request_path)
    }

    pub fn expect_post(&self, request_path: &str) -> StubBuilder<'_> {
        StubBuilder::new(&self.server, "POST", request_path)
    }

    /// Panics if any mounted `expect_times` expectation was not met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Requests received so far, in arrival order.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

enum StubBody {
    Json(Value),
    Text(String),
}

/// Declarative description of one stubbed endpoint.
pub struct StubBuilder<'a> {
    server: &'a WiremockServer,
    method: &'static str,
    path: String,
    headers: Vec<(String, String)>,
    body_fragments: Vec<String>,
    status: u16,
    body: Option<StubBody>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl<'a> StubBuilder<'a> {
    fn new(server: &'a WiremockServer, method: &'static str, request_path: &str) -> Self {
        Self {
            server,
            method,
            path: request_path.to_string(),
            headers: Vec::new(),
            body_fragments: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Only match requests carrying this exact header value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Only match requests whose body contains `fragment`.
    pub fn with_body_string_contains(mut self, fragment: &str) -> Self {
        self.body_fragments.push(fragment.to_string());
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(StubBody::Json(body));
        self
    }

    pub fn respond_with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(StubBody::Text(body.into()));
        self
    }

    pub const fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Alias of `respond_with_json` that reads better after a status.
    pub fn with_json_response(self, body: Value) -> Self {
        self.respond_with_json(body)
    }

    pub const fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub const fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut builder = Mock::given(method(self.method)).and(path(self.path.as_str()));
        for (name, value) in &self.headers {
            builder = builder.and(header(name.as_str(), value.as_str()));
        }
        for fragment in &self.body_fragments {
            builder = builder.and(body_string_contains(fragment.as_str()));
        }

        let mut template = ResponseTemplate::new(self.status);
        template = match self.body {
            Some(StubBody::Json(body)) => template.set_body_json(body),
            Some(StubBody::Text(body)) => template.set_body_string(body),
            None => template,
        };
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = builder.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
