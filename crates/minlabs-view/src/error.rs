//! View error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Element not found: #{0}")]
    MissingElement(String),
}
