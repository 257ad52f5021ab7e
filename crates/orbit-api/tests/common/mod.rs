//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - Stub the Orbit API over real HTTP
//! - [`refused_url`] - An address nothing listens on, for transport failures

#![allow(dead_code)]

pub mod http_mock;

use tokio::net::TcpListener;

/// Base URL of a local port that was just released, so connecting to it is refused.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Tagging response used across tests.
pub fn sample_tagging_json() -> serde_json::Value {
    serde_json::json!({
        "entities": {
            "e1": {
                "image": "i",
                "label": "l",
                "link": "lk",
                "relevance": 0.9,
                "thumbnail": "t",
                "type": "PERSON"
            }
        },
        "text": [],
        "remaining_words": 42
    })
}
