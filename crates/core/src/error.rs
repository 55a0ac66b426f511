use thiserror::Error;

use crate::model::validate::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a relational sync. Nothing has been written when this is
/// returned.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid content document: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
