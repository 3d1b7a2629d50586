// ABOUTME: Handlers for the landing page and unmatched paths

use axum::response::{Html, IntoResponse, Response};

use crate::error::AppError;
use crate::views;

/// Owner / Chef chooser
pub async fn landing_page() -> Html<String> {
    Html(views::landing::landing())
}

/// Fallback for any path no route matches
pub async fn not_found() -> Response {
    AppError::NotFound.into_response()
}
