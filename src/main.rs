//! Goods-Search HTTP server
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use clap::Parser;
use goods_search::{config, web::create_router, web::AppState, EsClient};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Keyword search over the marketplace goods indices
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to settings.yml
    #[arg(short, long, env = "GOODS_SEARCH_SETTINGS_PATH")]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    info!("Starting goods-search v{}", goods_search::VERSION);

    let mut settings = config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(bind) = cli.bind {
        settings.server.bind_address = bind;
    }

    // One client for the life of the process; a bad host stops startup here
    let client = EsClient::new(&settings.elasticsearch)
        .context("failed to create Elasticsearch client")?;
    info!(
        "Elasticsearch client for {} (indices: {})",
        client.base_url(),
        settings.indices.all().join(",")
    );

    let addr = SocketAddr::new(
        settings
            .server
            .bind_address
            .parse()
            .with_context(|| format!("invalid bind address {}", settings.server.bind_address))?,
        settings.server.port,
    );

    let state = AppState::new(settings, Arc::new(client));
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
