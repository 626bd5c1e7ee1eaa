use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ultrad::cli::Cli;
use ultrad::config::Config;
use ultrad::device::SystemProbe;
use ultrad::execution::Executor;
use ultrad::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("ULTRAD_LOG").unwrap_or_else(|_| "ultrad=info".to_string()))
        .init();

    let cfg = Config::load();

    // CLI overrides config; config falls back to built-in defaults.
    let bin = args.bin.unwrap_or_else(|| cfg.bin());
    let limit = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.command_timeout());
    let host = args.host.unwrap_or_else(|| cfg.http_host());
    let port = args.port.unwrap_or_else(|| cfg.http_port());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let executor = Executor::new(bin, limit, Arc::new(SystemProbe));

    info!("starting ultrad");
    server::serve(addr, Arc::new(AppState { executor })).await
}
