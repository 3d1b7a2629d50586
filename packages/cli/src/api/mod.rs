use axum::{routing::get, Router};
use pizzeria_api::DbState;

pub mod health;

/// Health check plus every page and JSON route of the application
pub fn create_router(state: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(pizzeria_api::create_router(state))
}
