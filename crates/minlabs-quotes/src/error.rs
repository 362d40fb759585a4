//! Quote error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Storage error: {0}")]
    Storage(#[from] minlabs_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No quote id left after the newest stored id")]
    IdExhausted,

    #[error("Unknown service type: {0}")]
    UnknownService(String),
}
