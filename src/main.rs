//! BlueGuard ML Service entry point
//!
//! Loads (or trains) the models before binding the listener.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blueguard_ml::{create_router, AppState, Config, PredictorService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "blueguard_ml=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("BlueGuard ML Service starting ({})...", config.environment);
    tracing::info!("Models path: {}", config.models_path.display());

    // Load or train models off the async reactor
    let models_path = config.models_path.clone();
    let options = config.training_options();
    let service = tokio::task::spawn_blocking(move || PredictorService::initialize(&models_path, options))
        .await
        .context("model initialization task panicked")?
        .context("failed to initialize models")?;

    let status = service.status();
    tracing::info!("Models ready: {:?}", status.available_models);

    // Build application state
    let state = AppState {
        service: Arc::new(service),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
