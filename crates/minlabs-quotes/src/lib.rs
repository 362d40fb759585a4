//! MinLabs Quote Store
//!
//! Budget/quote requests submitted through the widget form. The list is
//! ordered newest-first and mirrored to local storage as one JSON array after
//! every mutation.

mod error;
mod record;
mod store;

pub use error::QuoteError;
pub use record::{QuoteFields, QuoteRecord, QuoteUpdate, ServiceType};
pub use store::{QuoteStore, DEFAULT_STORAGE_KEY};

pub type Result<T> = std::result::Result<T, QuoteError>;
