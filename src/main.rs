use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use privateride::config::AppConfig;
use privateride::directory::DriverDirectory;
use privateride::handlers;
use privateride::services::ai::gemini::GeminiProvider;
use privateride::services::ai::GenerationProvider;
use privateride::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let directory = DriverDirectory::load(config.drivers_path.as_deref())?;
    tracing::info!(drivers = directory.all().len(), "driver directory loaded");

    if config.gemini_api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY not set, confirmations will use the fallback template");
    }
    let generation: Box<dyn GenerationProvider> = Box::new(GeminiProvider::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));

    let state = Arc::new(AppState {
        config: config.clone(),
        directory,
        generation,
    });

    let app = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/health", get(handlers::health::health))
        .route("/api/drivers", get(handlers::drivers::list_drivers))
        .route("/api/drivers/:id", get(handlers::drivers::get_driver))
        .route(
            "/api/bookings/:driver_id",
            post(handlers::booking::submit_booking),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
