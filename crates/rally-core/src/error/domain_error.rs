//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid notification intent: {0}")]
    InvalidIntent(String),

    #[error("Store error: {0}")]
    StoreError(String),
}
