//! Minimal DOM model
//!
//! Elements keep their attributes sorted so serialization is deterministic.
//! Nodes are addressed by [`NodePath`], the child indices from the root.

use std::collections::BTreeMap;

/// Elements serialized without an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_html(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Location of a node as child indices starting at the root element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// True when `self` is `other` or lies below it.
    pub fn starts_with(&self, other: &NodePath) -> bool {
        self.0.starts_with(&other.0)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    // === Builders ===

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    // === Accessors ===

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// `data-*` attribute lookup, e.g. `data("id")` reads `data-id`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{key}"))
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn set_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    // === Classes ===

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let kept: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        if kept.is_empty() {
            self.attrs.remove("class");
        } else {
            let joined = kept.join(" ");
            self.set_attr("class", joined);
        }
    }

    /// Toggle `class`, returning whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    // === Tree lookup ===

    pub fn get(&self, path: &NodePath) -> Option<&Element> {
        let mut current = self;
        for &index in path.indices() {
            current = current.children.get(index)?.as_element()?;
        }
        Some(current)
    }

    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut current = self;
        for &index in path.indices() {
            current = match current.children.get_mut(index)? {
                Node::Element(el) => el,
                Node::Text(_) => return None,
            };
        }
        Some(current)
    }

    /// First element in document order (self included) matching `pred`.
    pub fn find_path<F>(&self, pred: F) -> Option<NodePath>
    where
        F: Fn(&Element) -> bool,
    {
        fn walk<F: Fn(&Element) -> bool>(el: &Element, path: NodePath, pred: &F) -> Option<NodePath> {
            if pred(el) {
                return Some(path);
            }
            el.children.iter().enumerate().find_map(|(i, child)| {
                child
                    .as_element()
                    .and_then(|c| walk(c, path.child(i), pred))
            })
        }

        walk(self, NodePath::root(), &pred)
    }

    pub fn find<F>(&self, pred: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let path = self.find_path(pred)?;
        self.get(&path)
    }

    /// Every element in document order (self included) matching `pred`.
    pub fn find_all<F>(&self, pred: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        fn walk<'a, F: Fn(&Element) -> bool>(el: &'a Element, pred: &F, out: &mut Vec<&'a Element>) {
            if pred(el) {
                out.push(el);
            }
            for child in el.child_elements() {
                walk(child, pred, out);
            }
        }

        let mut out = Vec::new();
        walk(self, &pred, &mut out);
        out
    }

    /// Paths of every element matching `pred`, in document order.
    pub fn find_paths<F>(&self, pred: F) -> Vec<NodePath>
    where
        F: Fn(&Element) -> bool,
    {
        fn walk<F: Fn(&Element) -> bool>(el: &Element, path: NodePath, pred: &F, out: &mut Vec<NodePath>) {
            if pred(el) {
                out.push(path.clone());
            }
            for (i, child) in el.children.iter().enumerate() {
                if let Node::Element(c) = child {
                    walk(c, path.child(i), pred, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, NodePath::root(), &pred, &mut out);
        out
    }

    pub fn path_of_id(&self, id: &str) -> Option<NodePath> {
        self.find_path(|el| el.id() == Some(id))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(|el| el.id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        let path = self.path_of_id(id)?;
        self.get_mut(&path)
    }

    /// Nearest element at or above `target` matching `pred`.
    pub fn closest<F>(&self, target: &NodePath, pred: F) -> Option<NodePath>
    where
        F: Fn(&Element) -> bool,
    {
        let mut current = Some(target.clone());
        while let Some(path) = current {
            if let Some(el) = self.get(&path) {
                if pred(el) {
                    return Some(path);
                }
            }
            current = path.parent();
        }
        None
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => out.push_str(&el.text_content()),
            }
        }
        out
    }

    // === Form controls ===

    /// Current value of an `input`, `textarea` or `select`.
    pub fn form_value(&self) -> String {
        match self.tag.as_str() {
            "textarea" => self.text_content(),
            "select" => {
                let options = self.find_all(|el| el.tag == "option");
                options
                    .iter()
                    .find(|opt| opt.attr("selected").is_some())
                    .or_else(|| options.first())
                    .map(|opt| opt.option_value())
                    .unwrap_or_default()
            }
            _ => self.attr("value").unwrap_or("").to_string(),
        }
    }

    pub fn set_form_value(&mut self, value: &str) {
        match self.tag.as_str() {
            "textarea" => self.children = vec![Node::Text(value.to_string())],
            "select" => self.select_option(value),
            _ => self.set_attr("value", value),
        }
    }

    /// Clear every input and textarea below (and including) this element and
    /// return selects to their first option.
    pub fn reset_form_controls(&mut self) {
        match self.tag.as_str() {
            "input" => {
                if !matches!(
                    self.attr("type"),
                    Some("submit" | "button" | "hidden" | "reset")
                ) {
                    self.remove_attr("value");
                }
            }
            "textarea" => self.children.clear(),
            "select" => {
                self.for_each_option(&mut |opt| {
                    opt.remove_attr("selected");
                });
                return;
            }
            _ => {}
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.reset_form_controls();
            }
        }
    }

    fn option_value(&self) -> String {
        self.attr("value")
            .map(str::to_string)
            .unwrap_or_else(|| self.text_content().trim().to_string())
    }

    fn select_option(&mut self, value: &str) {
        self.for_each_option(&mut |opt| {
            if opt.option_value() == value {
                opt.set_attr("selected", "");
            } else {
                opt.remove_attr("selected");
            }
        });
    }

    fn for_each_option(&mut self, f: &mut dyn FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if el.tag == "option" {
                    f(el);
                } else {
                    el.for_each_option(f);
                }
            }
        }
    }

    // === Serialization ===

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_html(&mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
