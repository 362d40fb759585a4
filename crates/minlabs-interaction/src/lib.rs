//! MinLabs Interaction
//!
//! Clicks and submissions are decoded into an explicit [`ActionKind`] read from
//! the `data-action` attribute of the target or its nearest ancestor:
//! - `create` — quote form submission
//! - `delete` / `save` / `toggle-edit` — controls inside a rendered quote
//! - `toggle-card` — service card flip
//! - `toggle-dropdown` — navigation dropdown link

mod action;
mod error;
mod event;
mod layout;
mod state;
mod toggles;

pub use action::{decode, ActionKind, Container, Trigger};
pub use error::InteractionError;
pub use event::{EventOutcome, UiEvent};
pub use layout::PageLayout;
pub use state::{CardState, EditState, MenuState};
pub use toggles::{
    read_edit_fields, read_quote_form, reset_quote_form, toggle_card, toggle_dropdown,
    toggle_edit, trigger_id,
};

pub type Result<T> = std::result::Result<T, InteractionError>;
