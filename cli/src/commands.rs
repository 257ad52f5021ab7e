//! Subcommand implementations, written against `OrbitApiClient` so they can
//! run on a mock.

use std::sync::Arc;

use anyhow::Context;
use orbit_api::{
    spawn_account_info, spawn_concept_tag, AccountInfo, FormArgs, OrbitApiClient, TaggingResult,
};
use tokio::sync::mpsc;

/// Fetch account info and wait for the delivered outcome.
///
/// # Errors
/// Returns the API error, or an error if the task ended without a result.
pub async fn account_info(client: Arc<dyn OrbitApiClient>) -> anyhow::Result<AccountInfo> {
    let (tx, mut rx) = mpsc::channel(1);
    spawn_account_info(client, tx);

    let info = rx
        .recv()
        .await
        .context("account info task ended without a result")??;
    tracing::info!(fields = info.len(), "fetched account info");
    Ok(info)
}

/// Tag `args` and wait for the delivered outcome.
///
/// # Errors
/// Returns the API error, or an error if the task ended without a result.
pub async fn concept_tag(
    client: Arc<dyn OrbitApiClient>,
    args: FormArgs,
) -> anyhow::Result<TaggingResult> {
    let (tx, mut rx) = mpsc::channel(1);
    spawn_concept_tag(client, args, tx);

    let tags = rx
        .recv()
        .await
        .context("tagging task ended without a result")??;

    let top = tags.ranked_entities().first().map(|(id, _)| (*id).to_string());
    tracing::info!(
        entities = tags.entities.len(),
        remaining_words = tags.remaining_words,
        top_entity = top.as_deref().unwrap_or("-"),
        "tagged text"
    );
    Ok(tags)
}

/// Build tagging parameters from the text and extra `key=value` pairs.
#[must_use]
pub fn tag_args(text: &str, params: &[(String, String)]) -> FormArgs {
    let mut args = FormArgs::text(text);
    args.extend(params.iter().cloned());
    args
}

/// Parse a `KEY=VALUE` command-line parameter.
///
/// # Errors
/// Returns a message when the `=` is missing or the key is empty.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
