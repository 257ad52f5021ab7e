//! Client for the Orbit text-analysis API.
//!
//! Two remote operations are exposed through [`OrbitApiClient`]:
//!
//! - [`OrbitApiClient::account_info`] - `GET info`, authenticated with the
//!   `X-Orbit-API-Key` header
//! - [`OrbitApiClient::concept_tag`] - `POST tag` with a form-encoded body
//!   carrying the `api_key` field
//!
//! # Architecture
//!
//! - [`HttpOrbitClient`] - Real HTTP implementation using reqwest
//! - [`dispatch`] - Spawn a call on a tokio task and receive its outcome on a channel
//! - [`mock::MockOrbitClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! Each call returns its own decoded value; nothing is cached on the client,
//! so one client can be shared across tasks behind an `Arc`.
//!
//! Non-2xx responses surface as [`OrbitApiError::ApiError`] rather than being
//! decoded as a payload.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod client;
pub mod dispatch;
mod form;
mod types;

pub use client::{
    HttpOrbitClient, OrbitApiClient, OrbitApiError, API_KEY_FIELD, API_KEY_HEADER,
    DEFAULT_BASE_URL,
};
pub use dispatch::{spawn_account_info, spawn_concept_tag, Delivery, Outcome};
pub use form::FormArgs;
pub use types::{AccountInfo, EntityDescriptor, TaggingResult};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
