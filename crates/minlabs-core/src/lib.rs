//! MinLabs Core
//!
//! Central coordination layer for the quote widget. The widget owns all
//! state; the host page only displays the markup it is handed and forwards
//! submit and click events.

mod config;
mod error;
mod widget;

pub use config::{Config, StorageBackend, DEFAULT_PAGE};
pub use error::CoreError;
pub use widget::Widget;

// Re-export core components
pub use minlabs_interaction::{
    ActionKind, CardState, EditState, EventOutcome, MenuState, PageLayout, Trigger, UiEvent,
};
pub use minlabs_quotes::{
    QuoteError, QuoteFields, QuoteRecord, QuoteStore, QuoteUpdate, ServiceType,
    DEFAULT_STORAGE_KEY,
};
pub use minlabs_storage::{Database, KeyValueStore, MemoryStorage, SharedStorage, StorageError};
pub use minlabs_view::{Element, Node, NodePath, Page};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
