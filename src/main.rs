//! Status-and-proxy service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ GET /         ──▶ status source ──▶ (static body | MongoDB record)
//!     Client ──▶ GET /service  ──▶ remote client ──▶ http://{REMOTE_SERVICE}:{REMOTE_PORT}/
//! ```

use clap::Parser;
use std::path::PathBuf;

use status_proxy::config::load_config;
use status_proxy::lifecycle::start;
use status_proxy::observability::init_logging;

#[derive(Parser)]
#[command(name = "status-proxy")]
#[command(about = "Instance status endpoint and remote service proxy", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long, env = "STATUS_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port; overrides PORT and the config file.
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    init_logging(&config.observability.log_filter);

    let (server, listener) = start(&config).await?;

    tracing::info!(
        port = config.listener.port,
        "Status service listening on port {}",
        config.listener.port
    );

    server.run(listener).await?;
    Ok(())
}
