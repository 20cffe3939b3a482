use std::sync::Arc;

use anyhow::Result;
use reviewhub_config::ServerConfig;
use reviewhub_server::{router, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Loads `.env` first so its RUST_LOG is visible to the subscriber below.
    let config = ServerConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let addr = config.listen_addr()?;

    // A failed load is recorded in the state; the server still starts.
    let state = Arc::new(ServerState::initialize(&config).await);
    let app = router(state, &config.static_dir);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
