//! Run Orbit API calls on background tasks and deliver outcomes on a channel.
//!
//! Every spawned call sends exactly one [`Outcome`] (success or error), so a
//! receiver waiting on the channel is never left hanging.
//!
//! ```ignore
//! let client = Arc::new(HttpOrbitClient::new("my-api-key"));
//! let (tx, mut rx) = tokio::sync::mpsc::channel(1);
//! spawn_concept_tag(client, FormArgs::text("..."), tx);
//! match rx.recv().await {
//!     Some(Ok(tags)) => println!("{} entities", tags.entities.len()),
//!     Some(Err(e)) => eprintln!("tagging failed: {e}"),
//!     None => {}
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::{OrbitApiClient, OrbitApiError};
use crate::form::FormArgs;
use crate::types::{AccountInfo, TaggingResult};

/// Result of one API call as delivered on the channel.
pub type Outcome<T> = Result<T, OrbitApiError>;

/// Sending half of a delivery channel.
pub type Delivery<T> = mpsc::Sender<Outcome<T>>;

/// Fetch account info on a background task and send the outcome to `results`.
///
/// # Panics
/// Panics if called outside a Tokio runtime.
pub fn spawn_account_info<C>(client: Arc<C>, results: Delivery<AccountInfo>) -> JoinHandle<()>
where
    C: OrbitApiClient + ?Sized + 'static,
{
    spawn_delivery("info", results, async move { client.account_info().await })
}

/// Tag `args` on a background task and send the outcome to `results`.
///
/// # Panics
/// Panics if called outside a Tokio runtime.
pub fn spawn_concept_tag<C>(
    client: Arc<C>,
    args: FormArgs,
    results: Delivery<TaggingResult>,
) -> JoinHandle<()>
where
    C: OrbitApiClient + ?Sized + 'static,
{
    spawn_delivery("tag", results, async move { client.concept_tag(&args).await })
}

fn spawn_delivery<T, F>(operation: &'static str, results: Delivery<T>, call: F) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Future<Output = Outcome<T>> + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = call.await;
        if let Err(err) = &outcome {
            tracing::debug!(operation, error = %err, "Orbit API call failed");
        }
        if results.send(outcome).await.is_err() {
            tracing::debug!(operation, "result receiver dropped before delivery");
        }
    })
}
