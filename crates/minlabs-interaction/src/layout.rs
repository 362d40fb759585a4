//! Element ids the widget expects in the host page

use serde::{Deserialize, Serialize};

use crate::action::Container;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub form: String,
    pub name_input: String,
    pub email_input: String,
    pub service_select: String,
    pub description_input: String,
    /// List container receiving the rendered quotes
    pub quote_list: String,
    pub service_cards: String,
    pub navigation: String,
}

impl PageLayout {
    pub fn container_id(&self, container: Container) -> &str {
        match container {
            Container::QuoteForm => &self.form,
            Container::QuoteList => &self.quote_list,
            Container::ServiceCards => &self.service_cards,
            Container::Navigation => &self.navigation,
        }
    }

    /// Ids that must exist for quotes to be submitted and listed.
    pub fn required_ids(&self) -> [&str; 6] {
        [
            self.form.as_str(),
            self.name_input.as_str(),
            self.email_input.as_str(),
            self.service_select.as_str(),
            self.description_input.as_str(),
            self.quote_list.as_str(),
        ]
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            form: "form-presupuesto".to_string(),
            name_input: "input-nombre".to_string(),
            email_input: "input-email".to_string(),
            service_select: "select-servicio".to_string(),
            description_input: "input-descripcion".to_string(),
            quote_list: "lista-presupuestos".to_string(),
            service_cards: "servicios".to_string(),
            navigation: "navbar".to_string(),
        }
    }
}
