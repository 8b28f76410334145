// Jasper AI MCP server binary (stdio transport)

use anyhow::{Context, Result};
use clap::Parser;
use jasper_mcp::config::{require_api_key, ServerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jasper-mcp")]
#[command(about = "MCP server for Jasper AI content generation", long_about = None)]
#[command(version)]
struct Args {
    /// Jasper API key
    #[arg(long, env = "JASPER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Jasper API base URL, overriding the configuration file
    #[arg(long, env = "JASPER_API_BASE")]
    base_url: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "JASPER_MCP_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // stdout carries protocol frames, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jasper_mcp=info,jasper_sdk=info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let api_key = match require_api_key(args.api_key.clone()) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args, api_key).await {
        tracing::error!(error = ?e, "Fatal error in main()");
        std::process::exit(1);
    }
}

async fn run(args: Args, api_key: String) -> Result<()> {
    let config = ServerConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_base_url(args.base_url);

    tracing::info!(base_url = %config.api.base_url, "Starting Jasper AI MCP server");

    let client = config
        .client(api_key)
        .context("Failed to create Jasper client")?;
    let server = jasper_mcp::build_server(client)?;

    server.start().await
}
