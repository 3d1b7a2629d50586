// ABOUTME: Shared response helpers for HTML pages and the JSON API
// ABOUTME: JSON envelope, storage error mapping, and the post-submit redirect

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use tracing::error;

use pizzeria_storage::StorageError;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Convert a storage error into a JSON error envelope
pub fn storage_error_response(err: StorageError) -> Response {
    let (status, message) = match &err {
        StorageError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
        StorageError::Database(_) | StorageError::Sqlx(_) => {
            error!("Database error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            )
        }
        _ => {
            error!("Storage error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
}

/// 302 Found pointing at `location`, sent after a successful form submission
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
