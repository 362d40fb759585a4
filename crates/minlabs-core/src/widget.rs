//! Main widget state container
//!
//! Every user action flows through [`Widget::dispatch`]: the event is decoded
//! into an action, the matching handler mutates the quote store, the store
//! persists, and the quote list is redrawn from the store.

use std::collections::HashMap;

use minlabs_interaction::{
    decode, read_edit_fields, read_quote_form, reset_quote_form, toggle_card, toggle_dropdown,
    toggle_edit, trigger_id, ActionKind, EventOutcome, Trigger, UiEvent,
};
use minlabs_quotes::{QuoteFields, QuoteRecord, QuoteStore, QuoteUpdate};
use minlabs_storage::SharedStorage;
use minlabs_view::{render_into, Page};

use crate::config::Config;
use crate::Result;

type Handler = fn(&mut Widget, &Trigger) -> Result<EventOutcome>;

pub struct Widget {
    /// Configuration
    config: Config,
    /// Host page model
    page: Page,
    /// Quote list mirrored to local storage
    store: QuoteStore,
    handlers: HashMap<ActionKind, Handler>,
}

impl Widget {
    /// Open storage and the host page described by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let storage = config.open_storage()?;
        let page = Page::parse(&config.page_markup()?);
        Self::with_parts(config, storage, page)
    }

    /// Build a widget over an existing storage handle and page.
    pub fn with_parts(config: Config, storage: SharedStorage, page: Page) -> Result<Self> {
        page.require_ids(&config.layout.required_ids())?;

        let store = QuoteStore::load(storage, config.storage_key.clone());

        Ok(Self {
            config,
            page,
            store,
            handlers: default_handlers(),
        })
    }

    /// Draw the persisted quotes. Called once the host page is ready.
    pub fn initialize(&mut self) -> Result<()> {
        self.render()?;
        tracing::info!(quotes = self.store.len(), "Widget initialized");
        Ok(())
    }

    /// Handle one host event. Failures are logged and leave state untouched.
    pub fn dispatch(&mut self, event: &UiEvent) -> EventOutcome {
        let Some(trigger) = decode(self.page.document(), &self.config.layout, event) else {
            return EventOutcome::ignored();
        };

        let Some(handler) = self.handlers.get(&trigger.kind).copied() else {
            tracing::debug!(action = %trigger.kind, "No handler registered");
            return EventOutcome::ignored();
        };

        match handler(self, &trigger) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(action = %trigger.kind, error = %e, "Action failed");
                EventOutcome {
                    handled: false,
                    // A failed submission must still not reload the page
                    prevent_default: trigger.kind == ActionKind::Create,
                }
            }
        }
    }

    // === Quote operations ===

    pub fn create_quote(&mut self, fields: QuoteFields) -> Result<QuoteRecord> {
        let record = self.store.create(fields)?;
        self.render()?;
        Ok(record)
    }

    pub fn update_quote(&mut self, id: i64, update: QuoteUpdate) -> Result<bool> {
        let updated = self.store.update(id, update)?;
        if updated {
            self.render()?;
        }
        Ok(updated)
    }

    pub fn delete_quote(&mut self, id: i64) -> Result<bool> {
        let removed = self.store.delete(id)?;
        self.render()?;
        Ok(removed)
    }

    /// Redraw the quote list from the store.
    pub fn render(&mut self) -> Result<()> {
        render_into(
            &mut self.page,
            &self.config.layout.quote_list,
            self.store.quotes(),
        )?;
        Ok(())
    }

    // === Accessors ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn quotes(&self) -> &[QuoteRecord] {
        self.store.quotes()
    }

    /// Current markup of the quote list container.
    pub fn list_html(&self) -> Result<String> {
        Ok(self.page.inner_html(&self.config.layout.quote_list)?)
    }
}

fn default_handlers() -> HashMap<ActionKind, Handler> {
    let mut handlers: HashMap<ActionKind, Handler> = HashMap::new();
    handlers.insert(ActionKind::Create, handle_create);
    handlers.insert(ActionKind::Delete, handle_delete);
    handlers.insert(ActionKind::Update, handle_update);
    handlers.insert(ActionKind::ToggleEdit, handle_toggle_edit);
    handlers.insert(ActionKind::ToggleCard, handle_toggle_card);
    handlers.insert(ActionKind::ToggleDropdown, handle_toggle_dropdown);
    handlers
}

fn handle_create(widget: &mut Widget, _trigger: &Trigger) -> Result<EventOutcome> {
    let fields = read_quote_form(&widget.page, &widget.config.layout)?;
    widget.create_quote(fields)?;
    reset_quote_form(&mut widget.page, &widget.config.layout)?;
    Ok(EventOutcome::handled_prevent_default())
}

fn handle_delete(widget: &mut Widget, trigger: &Trigger) -> Result<EventOutcome> {
    let id = trigger_id(widget.page.document(), &trigger.path)?;
    widget.delete_quote(id)?;
    Ok(EventOutcome::handled())
}

fn handle_update(widget: &mut Widget, trigger: &Trigger) -> Result<EventOutcome> {
    let document = widget.page.document();
    let id = trigger_id(document, &trigger.path)?;
    let fields = read_edit_fields(document, &trigger.path)?;
    widget.update_quote(id, fields.into())?;
    Ok(EventOutcome::handled())
}

fn handle_toggle_edit(widget: &mut Widget, trigger: &Trigger) -> Result<EventOutcome> {
    Ok(match toggle_edit(widget.page.document_mut(), &trigger.path) {
        Some(_) => EventOutcome::handled(),
        None => EventOutcome::ignored(),
    })
}

fn handle_toggle_card(widget: &mut Widget, trigger: &Trigger) -> Result<EventOutcome> {
    Ok(match toggle_card(widget.page.document_mut(), &trigger.path) {
        Some(_) => EventOutcome::handled(),
        None => EventOutcome::ignored(),
    })
}

fn handle_toggle_dropdown(widget: &mut Widget, trigger: &Trigger) -> Result<EventOutcome> {
    let (menu, prevent_default) = toggle_dropdown(widget.page.document_mut(), &trigger.path);
    Ok(EventOutcome {
        handled: menu.is_some(),
        prevent_default,
    })
}
