//! HikVision webhook relay binary.
//!
//! ```text
//!   HikVision device                 relay                      downstream
//!  ──────────────────▶ POST /webhook/hikvision ──▶ POST <downstream_url>
//!                      GET  /webhook/hikvision     (JSON body, awaited)
//!                      GET  /health
//!  ◀────────────────── 200 OK | 500 {"error"} | 404 Not found
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hikvision_relay::config::load_config;
use hikvision_relay::lifecycle::{signals, Shutdown};
use hikvision_relay::observability::{logging, metrics};
use hikvision_relay::RelayServer;

#[derive(Parser)]
#[command(name = "hikvision-relay")]
#[command(about = "Relays HikVision webhook callbacks to a downstream endpoint", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port; overrides the config file and `PORT`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "hikvision-relay starting");
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        downstream = %config.relay.downstream_url,
        max_body_bytes = config.listener.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses when metrics are enabled.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::forward_signals(shutdown));

    RelayServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
