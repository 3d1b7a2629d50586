// ABOUTME: Storage error type shared by every entity storage
// ABOUTME: Wraps sqlx failures and carries name rejections up to the HTTP layer

use pizzeria_core::NameRejection;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Topping not found: {0}")]
    ToppingNotFound(i64),
    #[error("No topping named {0:?}")]
    UnknownTopping(String),
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameRejection),
    #[error("Duplicate name: {0}")]
    DuplicateName(String),
}

impl StorageError {
    /// The name rejection behind this error, if it is one.
    ///
    /// Duplicate names are reported through the same rejection type as the
    /// shape checks so callers can render a single message for all of them.
    pub fn name_rejection(&self) -> Option<NameRejection> {
        match self {
            StorageError::InvalidName(rejection) => Some(*rejection),
            StorageError::DuplicateName(_) => Some(NameRejection::Duplicate),
            _ => None,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
