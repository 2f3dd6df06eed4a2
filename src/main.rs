//! Server binary: reads configuration, connects the pool, serves the router.

use news_api::{app, store, AppConfig, AppState, PgRepository};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("news_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = store::connect(&config).await?;
    if config.ensure_schema {
        store::ensure_tables(&pool).await?;
        tracing::info!("tables ensured");
    }

    let state = AppState::new(PgRepository::new(pool));
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
