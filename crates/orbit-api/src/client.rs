//! Orbit API client for account info and concept tagging.
//!
//! This module provides a trait-based HTTP client for the Orbit
//! text-analysis API. The trait abstraction enables:
//!
//! - Easy mocking in unit tests
//! - HTTP-level testing with `MockHttpServer` in integration tests
//! - Pointing the client at a proxy or a local stub
//!
//! # Example
//!
//! ```ignore
//! use orbit_api::{FormArgs, HttpOrbitClient, OrbitApiClient};
//!
//! let client = HttpOrbitClient::new("my-api-key");
//! let tags = client.concept_tag(&FormArgs::text("Barack Obama visited Berlin")).await?;
//! println!("{} words left", tags.remaining_words);
//! ```

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::form::FormArgs;
use crate::types::{AccountInfo, TaggingResult};

/// URL on which the Orbit API can be reached.
pub const DEFAULT_BASE_URL: &str = "http://api.orbitapi.com/";

/// Header carrying the credential on GET requests.
pub const API_KEY_HEADER: &str = "X-Orbit-API-Key";

/// Form field carrying the credential on POST requests.
pub const API_KEY_FIELD: &str = "api_key";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Errors that can occur when calling the Orbit API.
#[derive(Debug, Error)]
pub enum OrbitApiError {
    /// The request could not be built (bad URL or header value)
    #[error("Failed to build request: {0}")]
    Build(#[source] reqwest::Error),

    /// HTTP request failed in transit
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

impl From<reqwest::Error> for OrbitApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Build(err)
        } else {
            Self::Request(err)
        }
    }
}

/// Trait for Orbit API operations.
///
/// Use `HttpOrbitClient` for real HTTP calls, or `mock::MockOrbitClient`
/// (behind the `test-utils` feature) in tests.
#[async_trait]
pub trait OrbitApiClient: Send + Sync {
    /// Fetch details about the account owning the API key.
    async fn account_info(&self) -> Result<AccountInfo, OrbitApiError>;

    /// Tag the concepts found in the text described by `args`.
    ///
    /// The caller's `args` are left untouched; the credential is added to
    /// the outgoing copy.
    async fn concept_tag(&self, args: &FormArgs) -> Result<TaggingResult, OrbitApiError>;
}

/// HTTP-based implementation of `OrbitApiClient`.
#[derive(Debug, Clone)]
pub struct HttpOrbitClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpOrbitClient {
    /// Create a client for the public Orbit endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a client against a different host (proxies, stubs).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, proxies).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Send a GET request; the key travels in the `X-Orbit-API-Key` header.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, OrbitApiError> {
        let request = self
            .client
            .get(self.endpoint(path))
            .header(API_KEY_HEADER, &self.api_key);

        execute(request, path).await
    }

    /// Send a form-encoded POST request; the key travels as `api_key`.
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        args: &FormArgs,
    ) -> Result<T, OrbitApiError> {
        let mut form = args.clone();
        form.set(API_KEY_FIELD, self.api_key.as_str());

        let request = self
            .client
            .post(self.endpoint(path))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form.encode());

        execute(request, path).await
    }
}

/// Send the request and decode the JSON body into `T`.
///
/// The response is consumed while reading the body, so the connection is
/// released on every path out of this function.
async fn execute<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    path: &str,
) -> Result<T, OrbitApiError> {
    tracing::debug!(path, "sending Orbit API request");

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        tracing::warn!(
            path,
            status = status.as_u16(),
            "Orbit API returned an error status"
        );
        return Err(OrbitApiError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    tracing::debug!(
        path,
        status = status.as_u16(),
        bytes = body.len(),
        "received Orbit API response"
    );

    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl OrbitApiClient for HttpOrbitClient {
    async fn account_info(&self) -> Result<AccountInfo, OrbitApiError> {
        self.get("info").await
    }

    async fn concept_tag(&self, args: &FormArgs) -> Result<TaggingResult, OrbitApiError> {
        self.post("tag", args).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{AccountInfo, FormArgs, OrbitApiClient, OrbitApiError, TaggingResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `OrbitApiClient` for unit tests.
    ///
    /// Configure responses with `set_*_result` methods and verify
    /// calls with `account_info_calls()` and `concept_tag_calls()`.
    pub struct MockOrbitClient {
        account_info_result: Mutex<Option<Result<AccountInfo, OrbitApiError>>>,
        concept_tag_result: Mutex<Option<Result<TaggingResult, OrbitApiError>>>,
        account_info_calls: Mutex<usize>,
        concept_tag_calls: Mutex<Vec<FormArgs>>,
    }

    impl MockOrbitClient {
        pub fn new() -> Self {
            Self {
                account_info_result: Mutex::new(None),
                concept_tag_result: Mutex::new(None),
                account_info_calls: Mutex::new(0),
                concept_tag_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `account_info` call.
        pub fn set_account_info_result(&self, result: Result<AccountInfo, OrbitApiError>) {
            *self.account_info_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `concept_tag` call.
        pub fn set_concept_tag_result(&self, result: Result<TaggingResult, OrbitApiError>) {
            *self.concept_tag_result.lock().unwrap() = Some(result);
        }

        /// Number of `account_info` calls made so far.
        pub fn account_info_calls(&self) -> usize {
            *self.account_info_calls.lock().unwrap()
        }

        /// Get all args passed to `concept_tag`.
        pub fn concept_tag_calls(&self) -> Vec<FormArgs> {
            self.concept_tag_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockOrbitClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl OrbitApiClient for MockOrbitClient {
        async fn account_info(&self) -> Result<AccountInfo, OrbitApiError> {
            *self.account_info_calls.lock().unwrap() += 1;

            self.account_info_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(AccountInfo::new()))
        }

        async fn concept_tag(&self, args: &FormArgs) -> Result<TaggingResult, OrbitApiError> {
            self.concept_tag_calls.lock().unwrap().push(args.clone());

            self.concept_tag_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(TaggingResult::default()))
        }
    }
}
