// ABOUTME: HTTP layer for Pizzeria providing HTML pages, form handling, and routing
// ABOUTME: Integration layer that depends on the topping and pizza storage packages

use axum::{routing::get, Router};

pub mod catalog_handlers;
pub mod db;
pub mod error;
pub mod forms;
pub mod landing_handlers;
pub mod pagination;
pub mod paths;
pub mod pizza_handlers;
pub mod response;
pub mod toppings_handlers;
pub mod views;

pub use db::DbState;
pub use error::AppError;

/// Creates the full application router: HTML pages plus the read-only JSON API
pub fn create_router(state: DbState) -> Router {
    Router::new()
        .route("/", get(landing_handlers::landing_page))
        .merge(create_toppings_router())
        .merge(create_pizza_router())
        .nest("/api", create_catalog_api_router())
        .fallback(landing_handlers::not_found)
        .with_state(state)
}

/// Creates the topping pages router
pub fn create_toppings_router() -> Router<DbState> {
    Router::new()
        .route("/toppings", get(toppings_handlers::toppings_overview))
        .route("/toppings/", get(toppings_handlers::toppings_overview))
        .route(
            "/toppings/new",
            get(toppings_handlers::new_topping_form).post(toppings_handlers::create_topping),
        )
        .route(
            "/toppings/{topping_id}",
            get(toppings_handlers::topping_editor).post(toppings_handlers::update_topping),
        )
        .route(
            "/toppings/{topping_id}/",
            get(toppings_handlers::topping_editor).post(toppings_handlers::update_topping),
        )
}

/// Creates the pizza pages router
pub fn create_pizza_router() -> Router<DbState> {
    Router::new()
        .route("/pizza", get(pizza_handlers::pizzas_overview))
        .route("/pizza/", get(pizza_handlers::pizzas_overview))
        .route(
            "/pizza/new",
            get(pizza_handlers::new_pizza_form).post(pizza_handlers::create_pizza),
        )
        .route(
            "/pizza/{pizza_id}",
            get(pizza_handlers::pizza_editor).post(pizza_handlers::update_pizza),
        )
        .route(
            "/pizza/{pizza_id}/",
            get(pizza_handlers::pizza_editor).post(pizza_handlers::update_pizza),
        )
}

/// Creates the read-only JSON API router
pub fn create_catalog_api_router() -> Router<DbState> {
    Router::new()
        .route("/toppings", get(catalog_handlers::list_toppings))
        .route("/toppings/{id}", get(catalog_handlers::get_topping))
        .route("/pizzas", get(catalog_handlers::list_pizzas))
        .route("/pizzas/{id}", get(catalog_handlers::get_pizza))
}
