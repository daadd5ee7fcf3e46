mod config;
mod routes;
mod services;
mod state;

use std::error::Error;

use crate::config::ServerConfig;
use crate::services::catalog::ProductCatalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        // A missing .env is the normal case outside development.
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env; using process environment");
        }
    }

    let config = ServerConfig::from_env();
    let port = config.port;
    let ttl = config.session_ttl;
    let reap_interval = config.reap_interval;

    let state = state::AppState::new(ProductCatalog::builtin(), config);
    tracing::info!(
        products = state.catalog.len(),
        ttl_secs = ttl.as_secs(),
        reap_secs = reap_interval.as_secs(),
        static_dir = %state.config.static_dir.display(),
        "catalog loaded"
    );

    // Spawn background expiry sweep.
    let _reaper = services::reaper::spawn_reaper_task(state.sessions.clone(), ttl, reap_interval);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "cart server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
