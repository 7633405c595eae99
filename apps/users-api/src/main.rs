use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Full application router: docs, `/api` routes, root info, health and fallback.
fn build_app(state: &AppState) -> eyre::Result<Router> {
    let api_routes = api::routes(state);

    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;

    Ok(router
        .merge(api::root::router())
        .merge(health_router(state.config.app)))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    let state = AppState::new(config);
    if state.config.seed_demo_users {
        info!("User store seeded with demo users");
    }

    let app = build_app(&state)?;

    let server_config = state.config.server.clone();
    let shutdown_timeout = state.config.shutdown_timeout;
    info!(
        "Users API listening on port {} (http://localhost:{}/api/users)",
        server_config.port, server_config.port
    );

    create_production_app(app, &server_config, shutdown_timeout, async move {
        info!("Shutting down: releasing in-memory user store");
        drop(state);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
