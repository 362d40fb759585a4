//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] minlabs_storage::StorageError),

    #[error("Quote error: {0}")]
    Quote(#[from] minlabs_quotes::QuoteError),

    #[error("View error: {0}")]
    View(#[from] minlabs_view::ViewError),

    #[error("Interaction error: {0}")]
    Interaction(#[from] minlabs_interaction::InteractionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
