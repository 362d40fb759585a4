//! Quote list renderer
//!
//! Full redraw on every change: the list container's children are replaced by
//! one block per quote, in list order.

use minlabs_quotes::{QuoteRecord, ServiceType};

use crate::dom::{Element, Node};
use crate::page::Page;
use crate::Result;

/// Class marking one rendered quote block.
pub const QUOTE_ITEM_CLASS: &str = "quote-item";
/// Class marking the collapsible edit form inside a quote block.
pub const EDIT_FORM_CLASS: &str = "edit-form";
/// Bootstrap utility class that hides an element.
pub const HIDDEN_CLASS: &str = "d-none";

/// `name` attributes of the edit fields inside a quote block.
pub const FIELD_NAME: &str = "nombre";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_SERVICE: &str = "servicio";
pub const FIELD_DESCRIPTION: &str = "descripcion";

pub fn render_quotes(quotes: &[QuoteRecord]) -> Vec<Node> {
    quotes.iter().map(|q| Node::Element(render_quote(q))).collect()
}

/// Replace the children of `list_id` with the rendered quotes.
pub fn render_into(page: &mut Page, list_id: &str, quotes: &[QuoteRecord]) -> Result<()> {
    page.replace_children(list_id, render_quotes(quotes))?;
    tracing::debug!(count = quotes.len(), "Rendered quote list");
    Ok(())
}

pub fn render_quote(quote: &QuoteRecord) -> Element {
    let id = quote.id.to_string();

    let summary = Element::new("div")
        .with_child(Element::new("strong").with_text(quote.service.label()))
        .with_child(
            Element::new("span")
                .with_class("text-muted d-block small")
                .with_text(format!("{} ({})", quote.name, quote.email)),
        );

    let controls = Element::new("div")
        .with_class("btn-group")
        .with_child(
            action_button("toggle-edit", &id, "btn btn-outline-secondary btn-sm").with_text("Editar"),
        )
        .with_child(action_button("delete", &id, "btn btn-danger btn-sm").with_text("Eliminar"));

    Element::new("li")
        .with_class("list-group-item")
        .with_class(QUOTE_ITEM_CLASS)
        .with_attr("data-id", id.clone())
        .with_child(
            Element::new("div")
                .with_class("d-flex justify-content-between align-items-center")
                .with_child(summary)
                .with_child(controls),
        )
        .with_child(edit_form(quote, &id))
}

fn edit_form(quote: &QuoteRecord, id: &str) -> Element {
    Element::new("form")
        .with_class(EDIT_FORM_CLASS)
        .with_class("mt-2")
        .with_class(HIDDEN_CLASS)
        .with_attr("data-id", id)
        .with_child(text_input(FIELD_NAME, "text", &quote.name))
        .with_child(text_input(FIELD_EMAIL, "email", &quote.email))
        .with_child(service_select(quote.service))
        .with_child(
            Element::new("textarea")
                .with_class("form-control form-control-sm mb-1")
                .with_attr("name", FIELD_DESCRIPTION)
                .with_attr("rows", "2")
                .with_text(quote.description.clone()),
        )
        .with_child(action_button("save", id, "btn btn-primary btn-sm").with_text("Guardar"))
}

fn text_input(name: &str, kind: &str, value: &str) -> Element {
    Element::new("input")
        .with_class("form-control form-control-sm mb-1")
        .with_attr("type", kind)
        .with_attr("name", name)
        .with_attr("value", value)
}

fn service_select(current: ServiceType) -> Element {
    ServiceType::ALL.iter().fold(
        Element::new("select")
            .with_class("form-select form-select-sm mb-1")
            .with_attr("name", FIELD_SERVICE),
        |select, service| {
            let mut option = Element::new("option")
                .with_attr("value", service.as_str())
                .with_text(service.label());
            if *service == current {
                option.set_attr("selected", "");
            }
            select.with_child(option)
        },
    )
}

fn action_button(action: &str, id: &str, class: &str) -> Element {
    Element::new("button")
        .with_attr("type", "button")
        .with_class(class)
        .with_attr("data-action", action)
        .with_attr("data-id", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minlabs_quotes::QuoteFields;
    use scraper::{Html, Selector};

    fn quotes() -> Vec<QuoteRecord> {
        vec![
            QuoteRecord::new(
                2,
                QuoteFields::new("Beto", "b@x.com", ServiceType::Composites, "hull <v2>"),
            ),
            QuoteRecord::new(
                1,
                QuoteFields::new("Ana", "a@x.com", ServiceType::Cad, "panel"),
            ),
        ]
    }

    fn list_page() -> Page {
        Page::from_element(Element::new("ul").with_attr("id", "lista-presupuestos"))
    }

    fn select_all(html: &str, selector: &str) -> Vec<String> {
        let fragment = Html::parse_fragment(html);
        let sel = Selector::parse(selector).unwrap();
        fragment.select(&sel).map(|el| el.html()).collect()
    }

    #[test]
    fn test_one_block_per_quote_in_order() {
        let mut page = list_page();
        render_into(&mut page, "lista-presupuestos", &quotes()).unwrap();
        let html = page.inner_html("lista-presupuestos").unwrap();

        let fragment = Html::parse_fragment(&html);
        let items = Selector::parse("li.quote-item").unwrap();
        let ids: Vec<&str> = fragment
            .select(&items)
            .filter_map(|el| el.value().attr("data-id"))
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_render_is_idempotent_and_replaces() {
        let mut page = list_page();
        render_into(&mut page, "lista-presupuestos", &quotes()).unwrap();
        let first = page.inner_html("lista-presupuestos").unwrap();
        render_into(&mut page, "lista-presupuestos", &quotes()).unwrap();
        let second = page.inner_html("lista-presupuestos").unwrap();
        assert_eq!(first, second);

        render_into(&mut page, "lista-presupuestos", &quotes()[1..]).unwrap();
        let html = page.inner_html("lista-presupuestos").unwrap();
        assert_eq!(select_all(&html, "li.quote-item").len(), 1);

        render_into(&mut page, "lista-presupuestos", &[]).unwrap();
        assert_eq!(page.inner_html("lista-presupuestos").unwrap(), "");
    }

    #[test]
    fn test_block_contents() {
        let block = render_quote(&quotes()[0]);
        let html = block.to_html();

        assert!(html.contains("<strong>Composites</strong>"));
        assert!(html.contains("Beto (b@x.com)"));
        assert!(html.contains("hull &lt;v2&gt;"));
        assert_eq!(
            select_all(&html, "button[data-action=delete][data-id='2']").len(),
            1
        );
        assert_eq!(select_all(&html, "form.edit-form.d-none").len(), 1);

        let fragment = Html::parse_fragment(&html);
        let selected = Selector::parse("select[name=servicio] option[selected]").unwrap();
        let values: Vec<&str> = fragment
            .select(&selected)
            .filter_map(|el| el.value().attr("value"))
            .collect();
        assert_eq!(values, vec!["Composites"]);
    }

    #[test]
    fn test_edit_fields_prefilled() {
        let block = render_quote(&quotes()[1]);
        let field = |name: &str| {
            block
                .find(|el| el.attr("name") == Some(name))
                .map(Element::form_value)
                .unwrap()
        };
        assert_eq!(field(FIELD_NAME), "Ana");
        assert_eq!(field(FIELD_EMAIL), "a@x.com");
        assert_eq!(field(FIELD_SERVICE), "CAD");
        assert_eq!(field(FIELD_DESCRIPTION), "panel");
    }
}
