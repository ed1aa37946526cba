use thiserror::Error;

/// Errors surfaced by a `RecordStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique-constraint violation; the field name is carried for the
    /// client-facing message (email/username on User).
    #[error("Duplicate value for unique field: {0}")]
    DuplicateKey(&'static str),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
