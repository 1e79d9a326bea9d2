//! Management CLI for the forward proxy.
//!
//! Each subcommand sends one control-path GET through the proxy's own wire
//! protocol (an HTTP/1.0 request with an absolute URI) and prints the status
//! line it answers with.

use clap::{Parser, Subcommand};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use forward_proxy::http::framer::read_to_close;

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Management CLI for the forward proxy", long_about = None)]
struct Cli {
    /// Proxy address as host:port.
    #[arg(short, long, default_value = "localhost:2100")]
    proxy: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Manage the host blocklist
    Blocklist {
        #[command(subcommand)]
        action: BlocklistAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Turn caching on
    Enable,
    /// Turn caching off
    Disable,
    /// Drop all cached entries
    Flush,
}

#[derive(Subcommand)]
enum BlocklistAction {
    /// Enforce the blocklist
    Enable,
    /// Stop enforcing the blocklist
    Disable,
    /// Drop all blocklist tokens
    Flush,
    /// Add a host:port substring token
    Add { token: String },
    /// Remove a host:port substring token
    Remove { token: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let path = match &cli.command {
        Commands::Cache { action } => match action {
            CacheAction::Enable => "/proxy/cache/enable".to_string(),
            CacheAction::Disable => "/proxy/cache/disable".to_string(),
            CacheAction::Flush => "/proxy/cache/flush".to_string(),
        },
        Commands::Blocklist { action } => match action {
            BlocklistAction::Enable => "/proxy/blocklist/enable".to_string(),
            BlocklistAction::Disable => "/proxy/blocklist/disable".to_string(),
            BlocklistAction::Flush => "/proxy/blocklist/flush".to_string(),
            BlocklistAction::Add { token } => format!("/proxy/blocklist/add/{token}"),
            BlocklistAction::Remove { token } => format!("/proxy/blocklist/remove/{token}"),
        },
    };

    let mut stream = TcpStream::connect(&cli.proxy).await?;
    let request = format!(
        "GET http://{proxy}{path} HTTP/1.0\r\nHost: {proxy}\r\n\r\n",
        proxy = cli.proxy
    );
    stream.write_all(request.as_bytes()).await?;

    let reply = read_to_close(&mut stream).await?;
    let reply = String::from_utf8_lossy(&reply);
    match reply.split("\r\n").next() {
        Some(status) if !status.is_empty() => println!("{status}"),
        _ => eprintln!("proxy closed the connection without a response"),
    }

    Ok(())
}
