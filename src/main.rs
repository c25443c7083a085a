//! API server entry point.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use wedl_core::ServerConfig;
use wedl_core::resolver::ResolverHttpTimeouts;

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.bind, args.port),
        max_file_bytes: args.max_file_bytes,
        resolver_base_url: args.base_url,
        resolver_timeouts: ResolverHttpTimeouts {
            connect_timeout_secs: args.connect_timeout,
            read_timeout_secs: args.read_timeout,
        },
    };

    let server = config
        .build_server()
        .context("failed to build API server")?;
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Starting API server");
    server.serve(listener, shutdown_signal()).await?;
    info!("API server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
