// ABOUTME: Server assembly for the pizzeria binary
// ABOUTME: Logging setup, middleware stack, database startup, and the listen loop

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use pizzeria_api::DbState;

pub mod api;
pub mod config;
pub mod middleware;

#[cfg(test)]
mod tests;

use config::Config;
use middleware::SecurityHeadersLayer;

/// Install the global tracing subscriber; `RUST_LOG` overrides the `info` default
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

/// Routes wrapped in the middleware stack selected by `config`
pub fn build_app(state: DbState, config: &Config) -> Router {
    let mut app = api::create_router(state)
        .layer(middleware::create_panic_handler())
        .layer(TraceLayer::new_for_http());

    if let Some(headers) = SecurityHeadersLayer::from_config(config) {
        app = app.layer(headers);
    }

    app
}

pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = DbState::init(&config.storage_config()).await?;
    let app = build_app(state, &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Pizzeria listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Bring the database schema up to date without starting the server
pub async fn run_migrations(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let pool = pizzeria_storage::init_pool(&config.storage_config()).await?;
    info!(
        "Migrations applied to {}",
        config.database_path.display()
    );
    pool.close().await;
    Ok(())
}
