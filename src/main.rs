//! tn-explorer - Tamil Nadu Explorer backend
//!
//! Tourism REST backend: place listings normalized from Overpass geodata with
//! best-effort image enrichment, saved destinations, and a chatbot proxy.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tn_explorer::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting tn-explorer backend");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    info!("Database: {}", config.database_path.display());

    let db_pool = tn_explorer::db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    let port = config.port;
    let state = AppState::new(db_pool, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on http://0.0.0.0:{port}");
    info!("Health check: http://0.0.0.0:{port}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
