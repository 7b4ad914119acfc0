use std::time::Duration;

use thiserror::Error;

/// Error for token store operations
#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    /// No live token matches; wrong hash, wrong scope and expiry all land here.
    #[error("Token not found")]
    NotFound,

    #[error("Token hash already stored")]
    DuplicateKey,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Database call exceeded {0:?}")]
    Timeout(Duration),
}
