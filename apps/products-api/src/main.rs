//! Products API - REST server for the product catalog

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryConfig;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    let db = database::postgres::connect_from_config_with_retry(
        config.postgres.clone(),
        RetryConfig::default(),
    )
        .await
        .map_err(|e| eyre::eyre!("Failed to connect to PostgreSQL: {}", e))?;

    info!("Successfully connected to PostgreSQL");

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router
    let api_routes = api::routes(&state);
    let health_routes = api::health_routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes, health_routes, &state.config.environment);

    info!(
        environment = ?state.config.environment,
        "Starting Products API on port {}",
        state.config.server.port
    );

    let server_config = state.config.server.clone();
    let db = state.db.clone();

    // Run REST server with graceful shutdown
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL connections");
        if let Err(e) = database::postgres::close(db).await {
            error!("Failed to close PostgreSQL pool: {}", e);
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
