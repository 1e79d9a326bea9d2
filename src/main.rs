//! Forward proxy entry point.
//!
//! Startup order: parse CLI, load config (flags override file values),
//! initialize logging and metrics, bind the listener, run until interrupted.

use std::path::PathBuf;

use clap::Parser;

use forward_proxy::config::loader::load_config;
use forward_proxy::config::ProxyConfig;
use forward_proxy::lifecycle::{signals, Shutdown};
use forward_proxy::net::listener::Listener;
use forward_proxy::observability;
use forward_proxy::ProxyServer;

#[derive(Parser)]
#[command(name = "forward-proxy")]
#[command(about = "Caching HTTP/1.0 forward proxy", long_about = None)]
struct Cli {
    /// Address to listen on (overrides config).
    #[arg(short, long)]
    address: Option<String>,

    /// Port to listen on (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(address) = cli.address {
        config.listener.address = address;
    }
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        address = %config.listener.address,
        port = config.listener.port,
        cache_enabled = config.cache.enabled,
        blocklist_enabled = config.blocklist.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    signals::listen(shutdown.clone());

    let server = ProxyServer::new(&config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
