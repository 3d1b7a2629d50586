// ABOUTME: Read-only JSON endpoints for toppings and pizzas
// ABOUTME: Paginated listings and single lookups wrapped in the standard API envelope

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use tracing::{debug, info};

use pizzeria_storage::StorageError;

use crate::db::DbState;
use crate::pagination::{ListQuery, PaginatedResponse};
use crate::response::{storage_error_response, ApiResponse};

/// List toppings, one page at a time
pub async fn list_toppings(
    State(db): State<DbState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!(
        "Listing toppings via API (page: {:?}, limit: {})",
        query.page,
        query.page_size()
    );

    let total = match db.topping_storage.count_toppings().await {
        Ok(total) => total,
        Err(e) => return storage_error_response(e),
    };
    let meta = query
        .page_request()
        .resolve_clamped(total, query.page_size());

    match db
        .topping_storage
        .list_toppings_paginated(Some(meta.page_size), Some(meta.offset()))
        .await
    {
        Ok((toppings, _)) => {
            let page = PaginatedResponse::new(toppings, meta);
            (StatusCode::OK, ResponseJson(ApiResponse::success(page))).into_response()
        }
        Err(e) => storage_error_response(e),
    }
}

/// Get a single topping by ID
pub async fn get_topping(State(db): State<DbState>, Path(topping_id): Path<String>) -> Response {
    info!("Getting topping via API: {}", topping_id);

    let Some(topping_id) = parse_api_id(&topping_id) else {
        return storage_error_response(StorageError::NotFound);
    };

    match db.topping_storage.get_topping(topping_id).await {
        Ok(topping) => (StatusCode::OK, ResponseJson(ApiResponse::success(topping))).into_response(),
        Err(e) => storage_error_response(e),
    }
}

/// List pizzas with their toppings, one page at a time
pub async fn list_pizzas(
    State(db): State<DbState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!(
        "Listing pizzas via API (page: {:?}, limit: {})",
        query.page,
        query.page_size()
    );

    let total = match db.pizza_storage.count_pizzas().await {
        Ok(total) => total,
        Err(e) => return storage_error_response(e),
    };
    let meta = query
        .page_request()
        .resolve_clamped(total, query.page_size());

    match db
        .pizza_storage
        .list_pizzas_paginated(Some(meta.page_size), Some(meta.offset()))
        .await
    {
        Ok((pizzas, _)) => {
            let page = PaginatedResponse::new(pizzas, meta);
            (StatusCode::OK, ResponseJson(ApiResponse::success(page))).into_response()
        }
        Err(e) => storage_error_response(e),
    }
}

/// Get a single pizza by ID
pub async fn get_pizza(State(db): State<DbState>, Path(pizza_id): Path<String>) -> Response {
    info!("Getting pizza via API: {}", pizza_id);

    let Some(pizza_id) = parse_api_id(&pizza_id) else {
        return storage_error_response(StorageError::NotFound);
    };

    match db.pizza_storage.get_pizza(pizza_id).await {
        Ok(pizza) => (StatusCode::OK, ResponseJson(ApiResponse::success(pizza))).into_response(),
        Err(e) => storage_error_response(e),
    }
}

/// Ids in API paths follow the HTML pages: anything but an integer names nothing
fn parse_api_id(raw: &str) -> Option<i64> {
    let id = raw.parse().ok();
    if id.is_none() {
        debug!("Non-integer id in API path: {}", raw);
    }
    id
}
