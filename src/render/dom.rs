//! Minimal DOM construction instructions and their HTML serialization.
//!
//! Render functions return `Vec<Node>`; nothing touches a page until the
//! nodes are swapped into a container (see [`super::page::Page`]).

use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

pub type HtmlWriter = Writer<Cursor<Vec<u8>>>;

/// Elements written as `<tag ... />`.
const VOID_ELEMENTS: &[&str] = &["img", "input", "br", "hr", "meta", "link", "source"];

/// One node of generated markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.push((key.to_string(), value.into()));
        self
    }

    /// Boolean attribute such as `muted` or `autoplay`.
    pub fn flag(self, key: &str) -> Self {
        self.attr(key, "")
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Mark the element hidden or shown via inline display style.
    pub fn display(self, visible: bool) -> Self {
        self.attr("style", if visible { "display: block" } else { "display: none" })
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Self::Element(elem)
    }
}

/// Inspection helpers for render tests.
#[cfg(test)]
impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(elem) => Some(elem),
            Self::Text(_) => None,
        }
    }
}

#[cfg(test)]
impl Element {
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn is_hidden(&self) -> bool {
        self.get_attr("style").is_some_and(|s| s.contains("display: none"))
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

#[cfg(test)]
fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(elem) => collect_text(&elem.children, out),
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Write nodes, escaping text and attribute values.
pub fn write_nodes(writer: &mut HtmlWriter, nodes: &[Node]) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::Element(elem) => write_element(writer, elem)?,
        }
    }
    Ok(())
}

fn write_element(writer: &mut HtmlWriter, elem: &Element) -> Result<()> {
    let mut start = BytesStart::new(elem.tag);
    for (k, v) in &elem.attrs {
        start.push_attribute((k.as_str(), v.as_str()));
    }

    if VOID_ELEMENTS.contains(&elem.tag) {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    write_nodes(writer, &elem.children)?;
    writer.write_event(Event::End(BytesEnd::new(elem.tag)))?;
    Ok(())
}
