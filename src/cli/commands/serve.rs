use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::app::app;
use crate::config::config;
use crate::database::DatabaseManager;
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides CATALOG_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Address to bind (overrides CATALOG_HOST)")]
    pub host: Option<String>,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config();
    config.validate()?;
    info!("Starting catalog admin in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open product database")?;
    let state = AppState::new(pool.clone(), config)?;

    tokio::fs::create_dir_all(state.uploads.dir())
        .await
        .with_context(|| format!("failed to create upload directory {}", state.uploads.dir().display()))?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Catalog admin listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
