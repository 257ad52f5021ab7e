#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use orbit_api::OrbitApiClient;
use orbit_cli::{
    commands,
    config::{Config, Overrides, DEFAULT_CONFIG_FILE},
};
use tracing_subscriber::EnvFilter;

/// Query the Orbit text-analysis API.
#[derive(Debug, Parser)]
#[command(name = "orbit-cli", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// API key (overrides config and ORBIT_API__KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL of the API (overrides config and ORBIT_API__BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show account information
    Info,
    /// Tag the concepts found in a piece of text
    Tag {
        /// Text to analyze
        text: String,

        /// Extra request parameter, may be repeated
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = commands::parse_param)]
        params: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let overrides = Overrides {
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone(),
    };
    let config = Config::load_with(&cli.config, &overrides).context("loading configuration")?;

    // RUST_LOG wins over the configured level; logs go to stderr so stdout stays JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(base_url = %config.api.base_url, "orbit-cli starting up");

    let client: Arc<dyn OrbitApiClient> = Arc::new(config.client());

    let output = match cli.command {
        Command::Info => serde_json::to_string_pretty(&commands::account_info(client).await?)?,
        Command::Tag { text, params } => {
            let args = commands::tag_args(&text, &params);
            serde_json::to_string_pretty(&commands::concept_tag(client, args).await?)?
        }
    };
    println!("{output}");

    Ok(())
}
