// ABOUTME: Error type for the HTML handlers
// ABOUTME: Maps missing resources to a 404 page and storage failures to a sanitized 500 page

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use pizzeria_storage::StorageError;

use crate::pagination::PageError;
use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound,
            other => AppError::Storage(other),
        }
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        debug!("Rejected overview page: {}", err);
        AppError::NotFound
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::errors::not_found())).into_response()
            }
            AppError::Storage(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::errors::server_error()),
                )
                    .into_response()
            }
        }
    }
}

/// Parse an item id taken from the URL; anything but an integer is a 404
pub fn parse_item_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}
