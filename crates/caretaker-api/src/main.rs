mod config;
mod error;
mod routes;

use std::sync::Arc;

use caretaker_core::db::Database;
use config::AppConfig;
use routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("caretaker_api=info,caretaker_core=info")
            }),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Starting caretaker-api with config: {:?}", config);

    let db = Database::open(&config.database_path)?;
    let state = AppState::new(Arc::clone(&config), db);
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("caretaker-api listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
