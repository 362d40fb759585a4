//! Interaction error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InteractionError {
    #[error("Malformed quote id: {0:?}")]
    MalformedId(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Quote error: {0}")]
    Quote(#[from] minlabs_quotes::QuoteError),

    #[error("View error: {0}")]
    View(#[from] minlabs_view::ViewError),
}
