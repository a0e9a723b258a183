use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use edumanager_api::config::AppConfig;
use edumanager_api::handlers::{self, AppState};
use edumanager_api::store::rest::RestStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL / SUPABASE_KEY.
    let _ = dotenvy::dotenv();

    // Missing credentials abort here, before anything is bound or served.
    let config = AppConfig::from_env().context("invalid configuration")?;

    let default_filter = if config.server.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let store = RestStore::new(&config.store).context("failed to build store client")?;
    let app = handlers::app(AppState {
        store: Arc::new(store),
    });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("EduManager API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server")?;

    Ok(())
}
