use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context as _;
use atelier_storage::ProjectStore;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atelier-server", about = "Read-only portfolio API")]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1", env = "ATELIER_HOST")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 5000, env = "ATELIER_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(ProjectStore::seeded().context("build project store")?);
    tracing::info!(projects = store.len(), "portfolio loaded");

    let addr = SocketAddr::from((args.host, args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "portfolio api listening");

    axum::serve(listener, server::router(store))
        .await
        .context("serve http")?;
    Ok(())
}
