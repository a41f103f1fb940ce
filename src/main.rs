//! Server: reads config from the environment, connects the store (applying migrations
//! for PostgreSQL), and serves the API on the configured address.

use todo_api_lite::{app, connect, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api_lite=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        e
    })?;
    tracing::info!(backend = config.store.backend_name(), "starting");
    let store = connect(&config.store).await.map_err(|e| {
        tracing::error!(error = %e, "store initialization failed");
        e
    })?;

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(AppState::new(store))).await?;
    Ok(())
}
