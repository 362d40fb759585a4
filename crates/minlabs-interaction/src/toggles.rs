//! DOM side of the interaction handlers
//!
//! Everything here works on the page model only. Quote mutations happen in
//! the store; these helpers read their inputs and flip UI-only state.

use minlabs_quotes::{QuoteFields, ServiceType};
use minlabs_view::{
    Element, NodePath, Page, EDIT_FORM_CLASS, FIELD_DESCRIPTION, FIELD_EMAIL, FIELD_NAME,
    FIELD_SERVICE, HIDDEN_CLASS, QUOTE_ITEM_CLASS,
};

use crate::error::InteractionError;
use crate::layout::PageLayout;
use crate::state::{CardState, EditState, MenuState, FLIPPED_CLASS, OPEN_CLASS};
use crate::Result;

pub const SHORT_DESCRIPTION_CLASS: &str = "descripcion-corta";
pub const DETAILED_DESCRIPTION_CLASS: &str = "descripcion-detallada";
pub const DROPDOWN_CLASS: &str = "dropdown";
pub const DROPDOWN_MENU_CLASS: &str = "dropdown-menu";

/// Parse the `data-id` of the element at `path`.
pub fn trigger_id(document: &Element, path: &NodePath) -> Result<i64> {
    let raw = document
        .get(path)
        .and_then(|el| el.data("id"))
        .unwrap_or_default();
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InteractionError::MalformedId(raw.to_string()))
}

/// Read the edit fields of the quote block enclosing `path`.
pub fn read_edit_fields(document: &Element, path: &NodePath) -> Result<QuoteFields> {
    let block_path = document
        .closest(path, |el| el.has_class(QUOTE_ITEM_CLASS))
        .ok_or_else(|| InteractionError::MissingField(QUOTE_ITEM_CLASS.to_string()))?;
    let block = document
        .get(&block_path)
        .ok_or_else(|| InteractionError::MissingField(QUOTE_ITEM_CLASS.to_string()))?;

    let field = |name: &str| -> Result<String> {
        block
            .find(|el| el.attr("name") == Some(name))
            .map(Element::form_value)
            .ok_or_else(|| InteractionError::MissingField(name.to_string()))
    };

    Ok(QuoteFields {
        name: field(FIELD_NAME)?,
        email: field(FIELD_EMAIL)?,
        service: field(FIELD_SERVICE)?.parse::<ServiceType>()?,
        description: field(FIELD_DESCRIPTION)?,
    })
}

/// Read the four submission inputs.
pub fn read_quote_form(page: &Page, layout: &PageLayout) -> Result<QuoteFields> {
    Ok(QuoteFields {
        name: page.value_of(&layout.name_input)?,
        email: page.value_of(&layout.email_input)?,
        service: page
            .value_of(&layout.service_select)?
            .parse::<ServiceType>()?,
        description: page.value_of(&layout.description_input)?,
    })
}

pub fn reset_quote_form(page: &mut Page, layout: &PageLayout) -> Result<()> {
    page.element_by_id_mut(&layout.form)?.reset_form_controls();
    Ok(())
}

/// Expand or collapse the edit form of the quote block enclosing `path`.
pub fn toggle_edit(document: &mut Element, path: &NodePath) -> Option<EditState> {
    let block_path = document.closest(path, |el| el.has_class(QUOTE_ITEM_CLASS))?;
    let block = document.get_mut(&block_path)?;
    let quote_id = block.data("id").unwrap_or_default().to_string();
    let form_path = block.find_path(|el| el.has_class(EDIT_FORM_CLASS))?;
    let form = block.get_mut(&form_path)?;

    form.toggle_class(HIDDEN_CLASS);
    let state = EditState::of(form);
    tracing::debug!(quote_id = %quote_id, state = %state, "Toggled edit form");
    Some(state)
}

/// Flip the card at `path` and swap which description block is visible.
pub fn toggle_card(document: &mut Element, path: &NodePath) -> Option<CardState> {
    let card = document.get_mut(path)?;
    card.toggle_class(FLIPPED_CLASS);

    let blocks = card.find_paths(|el| {
        el.has_class(SHORT_DESCRIPTION_CLASS) || el.has_class(DETAILED_DESCRIPTION_CLASS)
    });
    for block_path in blocks {
        if let Some(block) = card.get_mut(&block_path) {
            block.toggle_class(HIDDEN_CLASS);
        }
    }

    let state = CardState::of(card);
    tracing::debug!(state = %state, "Toggled service card");
    Some(state)
}

/// Toggle the menu next to the dropdown link at `path`.
///
/// Returns the new menu state, `None` when the link has no menu to open, and
/// whether the link's navigation must be suppressed (placeholder targets such
/// as `#`). The navigation decision holds even when no menu exists.
pub fn toggle_dropdown(document: &mut Element, path: &NodePath) -> (Option<MenuState>, bool) {
    let Some(link) = document.get(path) else {
        return (None, false);
    };
    let href = link.attr("href").unwrap_or("").trim();
    let prevent_default = href.is_empty() || href == "#";

    let state = toggle_menu(document, path);
    if state.is_none() {
        tracing::debug!(prevent_default, "Dropdown link without a menu");
    }
    (state, prevent_default)
}

fn toggle_menu(document: &mut Element, path: &NodePath) -> Option<MenuState> {
    let container_path = document.closest(path, |el| el.has_class(DROPDOWN_CLASS))?;
    let container = document.get_mut(&container_path)?;
    let menu_path = container.find_path(|el| el.has_class(DROPDOWN_MENU_CLASS))?;
    let menu = container.get_mut(&menu_path)?;

    menu.toggle_class(OPEN_CLASS);
    let state = MenuState::of(menu);
    tracing::debug!(state = %state, "Toggled dropdown");
    Some(state)
}
