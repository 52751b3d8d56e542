use anyhow::{Context, Result};
use clap::Parser;

use client_api::{api, config, db, logging};

/// Client records over HTTP
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Bind address, overrides HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    /// Database URL, overrides DATABASE_URL and DB_NAME
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = config::init()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
    }

    logging::init(config.log_format)?;

    // Initialize database connection
    let db = db::init(&config).await?;

    let app = api::router(api::AppState::new(db.clone()));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    tracing::info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
