//! Typed node tree
//!
//! The renderer builds a tree of [`Node`]s and hosts attach it: the browser
//! host turns it into real elements with text nodes, the headless host keeps
//! it in memory and serializes it. Text is never interpreted as markup; the
//! serializer escapes every text and attribute value.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A node in the rendered tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with children
    Element(DomElement),
    /// Untrusted text, inserted verbatim as a text node
    Text(String),
}

impl Node {
    /// Creates a text node
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The element, if this node is one
    #[must_use]
    pub const fn as_element(&self) -> Option<&DomElement> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    fn as_element_mut(&mut self) -> Option<&mut DomElement> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Element(el) => el.text_content(),
            Self::Text(t) => t.clone(),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(el) => el.write_html(out),
            Self::Text(t) => out.push_str(&escape_text(t)),
        }
    }
}

impl From<DomElement> for Node {
    fn from(el: DomElement) -> Self {
        Self::Element(el)
    }
}

/// A DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element tag name
    pub tag: String,
    /// CSS classes, in insertion order
    pub classes: Vec<String>,
    /// Attributes other than `class`
    pub attributes: BTreeMap<String, String>,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Appends a child element
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends child elements
    #[must_use]
    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Appends a text node
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::text(text));
        self
    }

    /// Adds a class once
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Sets an attribute, replacing any previous value
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &DomElement> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First descendant (or self) carrying `class`, depth-first
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&DomElement> {
        if self.has_class(class) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find_by_class(class))
    }

    /// Mutable variant of [`DomElement::find_by_class`]
    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut DomElement> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find_map(|c| c.find_by_class_mut(class))
    }

    /// All descendants (and self) carrying `class`, in document order
    #[must_use]
    pub fn all_by_class(&self, class: &str) -> Vec<&DomElement> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a DomElement>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_by_class(class, found);
        }
    }

    /// Concatenated descendant text
    #[must_use]
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Serializes the element as escaped HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&self.classes.join(" ")));
        }
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape_attr(value));
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Nodes written into the render target
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    /// Top-level nodes, in order
    pub nodes: Vec<Node>,
}

impl Fragment {
    /// Creates an empty fragment
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends a node
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Top-level elements
    pub fn elements(&self) -> impl Iterator<Item = &DomElement> {
        self.nodes.iter().filter_map(Node::as_element)
    }

    /// First element carrying `class`, depth-first
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&DomElement> {
        self.elements().find_map(|el| el.find_by_class(class))
    }

    /// Mutable variant of [`Fragment::find_by_class`]
    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut DomElement> {
        self.nodes
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find_map(|el| el.find_by_class_mut(class))
    }

    /// All elements carrying `class`, in document order
    #[must_use]
    pub fn all_by_class(&self, class: &str) -> Vec<&DomElement> {
        self.elements().flat_map(|el| el.all_by_class(class)).collect()
    }

    /// Number of elements carrying `class`
    #[must_use]
    pub fn count_by_class(&self, class: &str) -> usize {
        self.all_by_class(class).len()
    }

    /// Concatenated text of all nodes
    #[must_use]
    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// Serializes the fragment as escaped HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

impl From<DomElement> for Fragment {
    fn from(el: DomElement) -> Self {
        Self {
            nodes: vec![Node::Element(el)],
        }
    }
}

/// Escapes text content for HTML: `& < > " '`
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a double-quoted attribute value
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_element_new() {
        let elem = DomElement::new("span");
        assert_eq!(elem.tag, "span");
        assert!(elem.classes.is_empty());
        assert!(elem.children.is_empty());
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_add_class_dedupes() {
        let mut elem = DomElement::new("div");
        elem.add_class("foo");
        elem.add_class("bar");
        elem.add_class("foo");
        assert_eq!(elem.classes, vec!["foo", "bar"]);
    }

    #[test]
    fn test_attributes() {
        let mut elem = DomElement::new("button").with_attr("type", "button");
        assert_eq!(elem.get_attr("type"), Some("button"));
        elem.set_attr("type", "submit");
        assert_eq!(elem.get_attr("type"), Some("submit"));
        assert_eq!(elem.get_attr("missing"), None);
    }

    #[test]
    fn test_find_by_class_depth_first() {
        let tree = DomElement::new("div")
            .with_child(
                DomElement::new("div")
                    .with_class("card")
                    .with_child(DomElement::new("p").with_class("target").with_text("first")),
            )
            .with_child(DomElement::new("p").with_class("target").with_text("second"));

        assert_eq!(tree.find_by_class("target").unwrap().text_content(), "first");
        assert_eq!(tree.all_by_class("target").len(), 2);
        assert!(tree.find_by_class("absent").is_none());
    }

    #[test]
    fn test_find_by_class_mut() {
        let mut fragment = Fragment::from(
            DomElement::new("div").with_child(DomElement::new("div").with_class("strip")),
        );
        fragment
            .find_by_class_mut("strip")
            .unwrap()
            .set_attr("style", "transform: translateX(-100%)");
        assert_eq!(
            fragment.find_by_class("strip").unwrap().get_attr("style"),
            Some("transform: translateX(-100%)")
        );
    }

    #[test]
    fn test_text_content_concatenates() {
        let elem = DomElement::new("p")
            .with_text("a")
            .with_child(DomElement::new("b").with_text("b"))
            .with_text("c");
        assert_eq!(elem.text_content(), "abc");
    }

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let elem = DomElement::new("p")
            .with_class("tm-content")
            .with_attr("title", "\"quoted\" & 'single'")
            .with_text("<script>alert(1)</script>");
        assert_eq!(
            elem.to_html(),
            "<p class=\"tm-content\" title=\"&quot;quoted&quot; &amp; &#39;single&#39;\">\
             &lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_to_html_attribute_order_is_stable() {
        let a = DomElement::new("button")
            .with_attr("type", "button")
            .with_attr("aria-label", "Next");
        let b = DomElement::new("button")
            .with_attr("aria-label", "Next")
            .with_attr("type", "button");
        assert_eq!(a.to_html(), b.to_html());
    }

    #[test]
    fn test_fragment_count_by_class() {
        let mut fragment = Fragment::new();
        fragment.push(DomElement::new("h2").with_class("tm-widget-header"));
        fragment.push(
            DomElement::new("div")
                .with_children((0..3).map(|_| DomElement::new("div").with_class("tm-card"))),
        );
        assert_eq!(fragment.count_by_class("tm-card"), 3);
        assert_eq!(fragment.count_by_class("tm-widget-header"), 1);
    }

    #[test]
    fn test_escape_text_leaves_plain_text() {
        assert_eq!(escape_text("Great service ★★★"), "Great service ★★★");
        assert_eq!(escape_text("a & b"), "a &amp; b");
    }

    #[test]
    fn test_text_and_attributes_escape_the_same_set() {
        let raw = r#"<q cite='x'>"Tom & Jerry"</q>"#;
        let escaped = "&lt;q cite=&#39;x&#39;&gt;&quot;Tom &amp; Jerry&quot;&lt;/q&gt;";
        assert_eq!(escape_text(raw), escaped);
        assert_eq!(escape_attr(raw), escaped);

        let html = DomElement::new("p").with_text(raw).to_html();
        assert_eq!(html, format!("<p>{escaped}</p>"));
    }
}
