//! UI toggle state machines
//!
//! None of these states are persisted. Each maps onto one class on the
//! controlled element, so the DOM is the only place the state lives.

use serde::{Deserialize, Serialize};

use minlabs_view::{Element, HIDDEN_CLASS};

/// Class added to a service card while it shows its detailed description.
pub const FLIPPED_CLASS: &str = "flipped";
/// Class added to a dropdown menu while it is open.
pub const OPEN_CLASS: &str = "show";

/// A quote's edit form. Every re-render resets it to `Collapsed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditState {
    Collapsed,
    Expanded,
}

impl EditState {
    pub fn of(form: &Element) -> Self {
        if form.has_class(HIDDEN_CLASS) {
            EditState::Collapsed
        } else {
            EditState::Expanded
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EditState::Collapsed => EditState::Expanded,
            EditState::Expanded => EditState::Collapsed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditState::Collapsed => "collapsed",
            EditState::Expanded => "expanded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    Normal,
    Flipped,
}

impl CardState {
    pub fn of(card: &Element) -> Self {
        if card.has_class(FLIPPED_CLASS) {
            CardState::Flipped
        } else {
            CardState::Normal
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CardState::Normal => CardState::Flipped,
            CardState::Flipped => CardState::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardState::Normal => "normal",
            CardState::Flipped => "flipped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuState {
    Closed,
    Open,
}

impl MenuState {
    pub fn of(menu: &Element) -> Self {
        if menu.has_class(OPEN_CLASS) {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuState::Closed => "closed",
            MenuState::Open => "open",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

impl_display!(EditState, CardState, MenuState);
