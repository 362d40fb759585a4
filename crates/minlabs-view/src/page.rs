//! Host page model
//!
//! The host markup is parsed once into the DOM model; afterwards the widget
//! owns it and the host only displays what [`Page::inner_html`] returns.

use scraper::node::Node as HtmlNode;
use scraper::{ElementRef, Html};

use crate::dom::{Element, Node, NodePath};
use crate::error::ViewError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    document: Element,
}

impl Page {
    /// Parse a full HTML document. Comments are dropped, and so is
    /// whitespace-only text outside inline content.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let document = convert_element(parsed.root_element());

        tracing::debug!(
            elements = document.find_all(|_| true).len(),
            "Parsed host page"
        );

        Self { document }
    }

    pub fn from_element(document: Element) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Element {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Element {
        &mut self.document
    }

    pub fn element_by_id(&self, id: &str) -> Result<&Element> {
        self.document
            .find_by_id(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Result<&mut Element> {
        self.document
            .find_by_id_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    pub fn path_of_id(&self, id: &str) -> Result<NodePath> {
        self.document
            .path_of_id(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    /// Fail on the first id in `ids` that the page lacks.
    pub fn require_ids(&self, ids: &[&str]) -> Result<()> {
        for id in ids {
            self.element_by_id(id)?;
        }
        Ok(())
    }

    pub fn value_of(&self, id: &str) -> Result<String> {
        Ok(self.element_by_id(id)?.form_value())
    }

    pub fn set_value(&mut self, id: &str, value: &str) -> Result<()> {
        self.element_by_id_mut(id)?.set_form_value(value);
        Ok(())
    }

    pub fn replace_children(&mut self, id: &str, children: Vec<Node>) -> Result<()> {
        self.element_by_id_mut(id)?.set_children(children);
        Ok(())
    }

    pub fn inner_html(&self, id: &str) -> Result<String> {
        Ok(self.element_by_id(id)?.inner_html())
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.document.to_html())
    }
}

/// Elements whose text is kept exactly as written.
const RAW_TEXT_ELEMENTS: &[&str] = &["pre", "textarea"];

/// Phrasing elements; whitespace between two of these is rendered as a space.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "br", "button", "cite", "code", "em", "i", "img", "input", "kbd", "label",
    "mark", "q", "s", "select", "small", "span", "strong", "sub", "sup", "textarea", "time", "u",
    "var",
];

fn convert_element(source: ElementRef<'_>) -> Element {
    let value = source.value();
    let mut element = Element::new(value.name());
    for (name, attr) in value.attrs() {
        element.set_attr(name, attr);
    }

    let mut children = Vec::new();
    for child in source.children() {
        match child.value() {
            HtmlNode::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    children.push(Node::Element(convert_element(child_ref)));
                }
            }
            HtmlNode::Text(text) => {
                let text: &str = text;
                children.push(Node::Text(text.to_string()));
            }
            _ => {}
        }
    }

    if RAW_TEXT_ELEMENTS.contains(&value.name()) {
        element.set_children(children);
    } else {
        element.set_children(collapse_whitespace(children));
    }

    element
}

/// Drop whitespace-only text that only separates block content, and reduce
/// whitespace between inline siblings to a single space.
fn collapse_whitespace(children: Vec<Node>) -> Vec<Node> {
    let is_blank = |node: &Node| matches!(node, Node::Text(t) if t.trim().is_empty());
    let is_inline = |node: Option<&Node>| match node {
        Some(Node::Text(_)) => true,
        Some(Node::Element(el)) => INLINE_ELEMENTS.contains(&el.tag()),
        None => false,
    };

    let mut kept = Vec::with_capacity(children.len());
    for (i, node) in children.iter().enumerate() {
        if !is_blank(node) {
            kept.push(node.clone());
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| children.get(j));
        let after = children.get(i + 1);
        if is_inline(before) && is_inline(after) {
            kept.push(Node::Text(" ".to_string()));
        }
    }
    kept
}
