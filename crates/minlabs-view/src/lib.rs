//! MinLabs View
//!
//! The host page is held as a small DOM owned by the widget. The quote list
//! is redrawn from scratch after every change; nothing is patched in place.

mod dom;
mod error;
mod page;
mod render;

pub use dom::{escape_html, Element, Node, NodePath};
pub use error::ViewError;
pub use page::Page;
pub use render::{
    render_into, render_quote, render_quotes, EDIT_FORM_CLASS, FIELD_DESCRIPTION, FIELD_EMAIL,
    FIELD_NAME, FIELD_SERVICE, HIDDEN_CLASS, QUOTE_ITEM_CLASS,
};

pub type Result<T> = std::result::Result<T, ViewError>;
