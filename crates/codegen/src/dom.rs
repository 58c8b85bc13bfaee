//! A small in-memory element tree
//!
//! Both renderers build `Element` trees. The embed runtime also mutates them
//! in place (typing into inputs, checking boxes, swapping the logo source),
//! so the tree keeps attributes and inline styles as ordered, editable lists
//! rather than pre-rendered strings.

use quickcrm_core::{FormResult, RenderContext, Renderable};

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Render option that disables `style` attributes
pub const INLINE_STYLES_OPTION: &str = "inline_styles";

// ============================================================================
// Node
// ============================================================================

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

// ============================================================================
// Element
// ============================================================================

/// An HTML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set a boolean attribute when `on` is true
    pub fn flag(mut self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.set_attr(name, "");
        }
        self
    }

    /// Append to the `class` attribute
    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Set an inline style property
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    /// Append a child element
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append several child elements
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Append a text node
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Set an attribute, keeping its original position if already present
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    /// Set or clear a boolean attribute
    pub fn toggle_attr(&mut self, name: &str, on: bool) {
        if on {
            self.set_attr(name, "");
        } else {
            self.remove_attr(name);
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn add_class(&mut self, class: &str) {
        match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => {
                let joined = format!("{} {}", existing, class);
                self.set_attr("class", joined);
            }
            _ => self.set_attr("class", class),
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(existing) = self.get_attr("class") {
            let kept = existing
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("class", kept);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    // ========================================================================
    // Inline style
    // ========================================================================

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(k, _)| *k == property) {
            Some(slot) => slot.1 = value,
            None => self.style.push((property, value)),
        }
    }

    pub fn remove_style(&mut self, property: &str) {
        self.style.retain(|(k, _)| k != property);
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Direct element children
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First element in this subtree (self included) with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|el| el.id() == Some(id))
    }

    /// First element in this subtree (self included) with the given id
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.find_mut(&|el| el.id() == Some(id))
    }

    /// First element in document order matching `pred`
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.element_children().find_map(|child| child.find(pred))
    }

    /// First element in document order matching `pred`
    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in self.children.iter_mut().filter_map(Node::as_element_mut) {
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Every element in document order matching `pred`
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect(pred, &mut out);
        out
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.element_children() {
            child.collect(pred, out);
        }
    }

    /// Apply `f` to every element in this subtree matching `pred`
    pub fn for_each_mut(
        &mut self,
        pred: &dyn Fn(&Element) -> bool,
        f: &mut dyn FnMut(&mut Element),
    ) {
        if pred(self) {
            f(self);
        }
        for child in self.children.iter_mut().filter_map(Node::as_element_mut) {
            child.for_each_mut(pred, f);
        }
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => out.push_str(&el.text_content()),
            }
        }
        out
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render with a compact context
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&RenderContext::new(), &mut out);
        out
    }

    fn write_html(&self, ctx: &RenderContext, out: &mut String) {
        let inline_styles = ctx
            .get_option(INLINE_STYLES_OPTION)
            .is_none_or(|v| v != "false");

        out.push_str(&ctx.indent());
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() || !is_boolean_attr(name) {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        if inline_styles && !self.style.is_empty() {
            let css = self
                .style
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(" style=\"");
            out.push_str(&escape_attr(&css));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            out.push_str(ctx.newline());
            return;
        }

        let only_text = self.children.iter().all(|c| matches!(c, Node::Text(_)));
        if only_text {
            for child in &self.children {
                if let Node::Text(t) = child {
                    out.push_str(&escape_text(t));
                }
            }
        } else {
            out.push_str(ctx.newline());
            let inner = ctx.indented();
            for child in &self.children {
                match child {
                    Node::Element(el) => el.write_html(&inner, out),
                    Node::Text(t) => {
                        out.push_str(&inner.indent());
                        out.push_str(&escape_text(t));
                        out.push_str(ctx.newline());
                    }
                }
            }
            out.push_str(&ctx.indent());
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out.push_str(ctx.newline());
    }
}

impl Renderable for Element {
    fn render_html(&self, ctx: &RenderContext) -> FormResult<String> {
        let mut out = String::new();
        self.write_html(ctx, &mut out);
        Ok(out)
    }
}

fn is_boolean_attr(name: &str) -> bool {
    matches!(
        name,
        "required" | "checked" | "selected" | "multiple" | "disabled" | "hidden" | "novalidate"
    )
}

/// Escape text content
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

// ============================================================================
// Document
// ============================================================================

/// A host page: a `body` element the embed runtime mounts into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty page
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    /// A page holding one empty `<div>` with the given id
    pub fn with_container(id: &str) -> Self {
        let mut doc = Self::new();
        doc.body.children.push(Element::new("div").attr("id", id).into());
        doc
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    pub fn to_html(&self) -> String {
        self.body.to_html()
    }
}

// ============================================================================
// Tests
// ============================================================================
