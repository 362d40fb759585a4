//! Events delivered by the host page

use serde::{Deserialize, Serialize};

use minlabs_view::NodePath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Native submission of the form with this id
    Submit { form_id: String },
    /// Click whose innermost target is the element at `target`
    Click { target: NodePath },
}

impl UiEvent {
    pub fn submit(form_id: impl Into<String>) -> Self {
        UiEvent::Submit {
            form_id: form_id.into(),
        }
    }

    pub fn click(target: NodePath) -> Self {
        UiEvent::Click { target }
    }
}

/// What the host should do after an event was dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// An action ran to completion
    pub handled: bool,
    /// Suppress the browser's native behavior (navigation, form submit)
    pub prevent_default: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            prevent_default: false,
        }
    }

    pub fn handled_prevent_default() -> Self {
        Self {
            handled: true,
            prevent_default: true,
        }
    }
}
