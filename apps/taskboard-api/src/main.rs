use axum_helpers::{create_cors_layer, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::Repositories;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation, so startup errors are reported in color
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let repos = Repositories::new();

    let cors = create_cors_layer(
        config.server.cors_allowed_origins.as_deref(),
        config.environment.is_development(),
    )?;

    let app = create_router::<openapi::ApiDoc>(api::routes(&repos), cors)
        .merge(health_router(config.app));

    info!(
        name = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting taskboard API"
    );

    create_production_app(app, &config.server, async move {
        // Nothing is persisted; dropping the collections is the whole cleanup
        drop(repos);
        info!("In-memory collections released");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Taskboard API shutdown complete");
    Ok(())
}
