//! Crop Recommendation System - Backend Server
//!
//! Recommends the three best-suited crops for an Indian farm from its soil
//! readings, location and recent weather.

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crop_recommendation_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "crop_server=debug,crop_recommendation_backend=debug,tower_http=debug".into()
    });
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    // JSON logs in production, human-readable otherwise
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    tracing::info!("Starting Crop Recommendation Server");
    tracing::info!("Environment: {}", config.environment);

    // Model load failure is fatal
    tracing::info!(artifact_dir = %config.model.artifact_dir.display(), "Loading model artifacts...");
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    let state = AppState::from_config(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
