use std::sync::Arc;

use coursedesk::api::router;
use coursedesk::clock::SystemClock;
use coursedesk::config::AppConfig;
use coursedesk::state::AppState;
use coursedesk::storage::SqliteStorage;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "coursedesk=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let storage = Arc::new(SqliteStorage::connect(&config.database_url).await?);
    let state = AppState::build(storage, Arc::new(SystemClock), config.autosave_debounce).await?;

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
