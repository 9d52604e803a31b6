use std::net::SocketAddr;

use anyhow::Context;
use teamhub::app::build_router;
use teamhub::config::AppConfig;
use teamhub::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamhub=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(env = %config.app_env, "Starting teamhub server...");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::connect(config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
