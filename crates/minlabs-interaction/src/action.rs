//! Action decoding
//!
//! Event delegation: a click anywhere inside a control resolves to the nearest
//! element carrying `data-action`, and the action only counts when that element
//! sits inside the container the action belongs to.

use serde::{Deserialize, Serialize};

use minlabs_view::{Element, NodePath};

use crate::event::UiEvent;
use crate::layout::PageLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Submit a new quote
    Create,
    /// Remove a quote
    Delete,
    /// Save a quote's edit form
    Update,
    /// Expand or collapse a quote's edit form
    ToggleEdit,
    /// Flip a service card
    ToggleCard,
    /// Open or close a navigation dropdown
    ToggleDropdown,
}

/// Delegation containers, one listener each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    QuoteForm,
    QuoteList,
    ServiceCards,
    Navigation,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Create,
        ActionKind::Delete,
        ActionKind::Update,
        ActionKind::ToggleEdit,
        ActionKind::ToggleCard,
        ActionKind::ToggleDropdown,
    ];

    /// Value of the `data-action` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "create",
            ActionKind::Delete => "delete",
            ActionKind::Update => "save",
            ActionKind::ToggleEdit => "toggle-edit",
            ActionKind::ToggleCard => "toggle-card",
            ActionKind::ToggleDropdown => "toggle-dropdown",
        }
    }

    pub fn container(&self) -> Container {
        match self {
            ActionKind::Create => Container::QuoteForm,
            ActionKind::Delete | ActionKind::Update | ActionKind::ToggleEdit => {
                Container::QuoteList
            }
            ActionKind::ToggleCard => Container::ServiceCards,
            ActionKind::ToggleDropdown => Container::Navigation,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(ActionKind::Create),
            "delete" => Ok(ActionKind::Delete),
            "save" | "update" => Ok(ActionKind::Update),
            "toggle-edit" => Ok(ActionKind::ToggleEdit),
            "toggle-card" => Ok(ActionKind::ToggleCard),
            "toggle-dropdown" => Ok(ActionKind::ToggleDropdown),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// A decoded action and the element that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub kind: ActionKind,
    pub path: NodePath,
}

/// Decode an event against the current document.
///
/// Returns `None` for events that do not map to an action: submissions of
/// other forms, clicks outside any control, unknown `data-action` values, and
/// controls found outside their container.
pub fn decode(document: &Element, layout: &PageLayout, event: &UiEvent) -> Option<Trigger> {
    match event {
        UiEvent::Submit { form_id } => {
            if form_id != &layout.form {
                return None;
            }
            let path = document.path_of_id(form_id)?;
            Some(Trigger {
                kind: ActionKind::Create,
                path,
            })
        }
        UiEvent::Click { target } => decode_click(document, layout, target),
    }
}

fn decode_click(document: &Element, layout: &PageLayout, target: &NodePath) -> Option<Trigger> {
    let path = document.closest(target, |el| el.data("action").is_some())?;
    let raw = document.get(&path)?.data("action")?;

    let kind = match raw.parse::<ActionKind>() {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring click");
            return None;
        }
    };

    // Creation only happens through the form's submit event
    if kind == ActionKind::Create {
        return None;
    }

    let container = document.path_of_id(layout.container_id(kind.container()))?;
    if !path.starts_with(&container) {
        tracing::debug!(action = %kind, "Ignoring action outside its container");
        return None;
    }

    Some(Trigger { kind, path })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Element {
        Element::new("body")
            .with_child(
                Element::new("ul").with_attr("id", "lista-presupuestos").with_child(
                    Element::new("li").with_child(
                        Element::new("button")
                            .with_attr("data-action", "delete")
                            .with_attr("data-id", "1")
                            .with_child(Element::new("i").with_class("icon")),
                    ),
                ),
            )
            .with_child(
                Element::new("div")
                    .with_attr("id", "servicios")
                    .with_child(
                        Element::new("div")
                            .with_attr("data-action", "toggle-card")
                            .with_child(Element::new("p").with_text("short")),
                    )
                    // A delete control outside the quote list
                    .with_child(Element::new("button").with_attr("data-action", "delete")),
            )
            .with_child(Element::new("form").with_attr("id", "form-presupuesto"))
            .with_child(Element::new("button").with_attr("data-action", "explode"))
    }

    fn click(doc: &Element, pred: impl Fn(&Element) -> bool) -> Option<Trigger> {
        let target = doc.find_path(pred).unwrap();
        decode(doc, &PageLayout::default(), &UiEvent::click(target))
    }

    #[test]
    fn test_click_resolves_to_nearest_action() {
        let doc = document();
        let trigger = click(&doc, |el| el.has_class("icon")).unwrap();
        assert_eq!(trigger.kind, ActionKind::Delete);
        assert_eq!(doc.get(&trigger.path).unwrap().data("id"), Some("1"));

        let trigger = click(&doc, |el| el.tag() == "p").unwrap();
        assert_eq!(trigger.kind, ActionKind::ToggleCard);
    }

    #[test]
    fn test_ignored_clicks() {
        let doc = document();
        // No action on the path
        assert!(click(&doc, |el| el.tag() == "ul").is_none());
        // Unknown action
        assert!(click(&doc, |el| el.data("action") == Some("explode")).is_none());
        // Delete outside the list container
        assert!(click(&doc, |el| el.data("action") == Some("delete") && el.data("id").is_none())
            .is_none());
    }

    #[test]
    fn test_submit_decodes_to_create() {
        let doc = document();
        let layout = PageLayout::default();
        let trigger = decode(&doc, &layout, &UiEvent::submit("form-presupuesto")).unwrap();
        assert_eq!(trigger.kind, ActionKind::Create);
        assert!(decode(&doc, &layout, &UiEvent::submit("newsletter")).is_none());
    }

    #[test]
    fn test_action_names() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
        assert_eq!("update".parse::<ActionKind>().unwrap(), ActionKind::Update);
        assert!("".parse::<ActionKind>().is_err());
    }
}
