//! Application error types for core storage and domain logic.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Paste expired")]
    Expired,

    #[error("View limit exceeded")]
    ViewLimitExceeded,

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Whether this error means "the paste cannot be read".
    ///
    /// Missing, expired, and exhausted pastes are reported identically to
    /// clients so they cannot tell whether a paste ever existed.
    pub fn is_not_found_class(&self) -> bool {
        matches!(self, Self::NotFound | Self::Expired | Self::ViewLimitExceeded)
    }

    /// Whether this error was caused by client input.
    pub fn is_client_input(&self) -> bool {
        matches!(self, Self::InvalidContent(_) | Self::BadRequest(_))
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}
