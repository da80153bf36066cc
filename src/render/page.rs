//! Page templates with named containers.
//!
//! A template is ordinary HTML. Any element whose `id` matches a swapped
//! container has its content cleared and replaced by freshly rendered nodes;
//! everything else is copied through untouched. A container missing from the
//! template turns its swap into a no-op.

use anyhow::{Result, bail};
use quick_xml::{
    Reader, Writer,
    escape::escape,
    events::{BytesStart, Event},
};
use std::collections::HashMap;
use std::io::Cursor;

use super::dom::{HtmlWriter, Node, write_nodes};

/// A template plus the pending container contents.
#[derive(Debug, Clone)]
pub struct Page {
    template: String,
    swaps: HashMap<String, Vec<Node>>,
    attrs: HashMap<String, Vec<(String, String)>>,
}

impl Page {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            swaps: HashMap::new(),
            attrs: HashMap::new(),
        }
    }

    /// Replace a `{name}` placeholder with an escaped value.
    pub fn set_var(&mut self, name: &str, value: &str) -> &mut Self {
        self.template = self.template.replace(&format!("{{{name}}}"), &escape(value));
        self
    }

    /// Clear the container with `id` and fill it with `nodes`.
    pub fn swap(&mut self, id: &str, nodes: Vec<Node>) -> &mut Self {
        self.swaps.insert(id.to_string(), nodes);
        self
    }

    /// Set (or overwrite) one attribute on the element with `id`.
    pub fn set_attr(&mut self, id: &str, key: &str, value: &str) -> &mut Self {
        let attrs = self.attrs.entry(id.to_string()).or_default();
        attrs.retain(|(k, _)| k != key);
        attrs.push((key.to_string(), value.to_string()));
        self
    }

    /// Whether the template declares an element with this `id`.
    pub fn has_container(&self, id: &str) -> bool {
        let mut reader = Reader::from_reader(self.template.as_bytes());
        reader.config_mut().enable_all_checks(false);

        loop {
            match reader.read_event() {
                Ok(Event::Start(elem) | Event::Empty(elem)) => {
                    if element_id(&elem).as_deref() == Some(id) {
                        return true;
                    }
                }
                Ok(Event::Eof) | Err(_) => return false,
                Ok(_) => {}
            }
        }
    }

    /// Produce the final HTML.
    pub fn render(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::with_capacity(self.template.len() * 2)));
        let mut reader = Reader::from_reader(self.template.as_bytes());
        reader.config_mut().trim_text(false);
        reader.config_mut().enable_all_checks(false);

        loop {
            match reader.read_event() {
                Ok(Event::Start(elem)) => {
                    let id = element_id(&elem);
                    let start = self.with_attrs(&elem, id.as_deref());
                    match id.as_deref().and_then(|id| self.swaps.get(id)) {
                        Some(nodes) => {
                            let end = elem.to_end().into_owned();
                            // Discard the old content
                            reader.read_to_end(end.name())?;
                            writer.write_event(Event::Start(start))?;
                            write_nodes(&mut writer, nodes)?;
                            writer.write_event(Event::End(end))?;
                        }
                        None => writer.write_event(Event::Start(start))?,
                    }
                }
                Ok(Event::Empty(elem)) => {
                    let id = element_id(&elem);
                    let start = self.with_attrs(&elem, id.as_deref());
                    match id.as_deref().and_then(|id| self.swaps.get(id)) {
                        Some(nodes) => write_container(&mut writer, start, nodes)?,
                        None => writer.write_event(Event::Empty(start))?,
                    }
                }
                Ok(Event::Eof) => break,
                Ok(event) => writer.write_event(event)?,
                Err(e) => bail!(
                    "template parse error at position {}: {:?}",
                    reader.error_position(),
                    e
                ),
            }
        }

        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    /// Rebuild an element with attribute overrides applied.
    fn with_attrs<'a>(&self, elem: &BytesStart<'a>, id: Option<&str>) -> BytesStart<'a> {
        let Some(overrides) = id.and_then(|id| self.attrs.get(id)) else {
            return elem.clone();
        };

        let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
        let mut rebuilt = BytesStart::new(tag);
        for attr in elem.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if overrides.iter().all(|(k, _)| *k != key) {
                rebuilt.push_attribute((attr.key.as_ref(), attr.value.as_ref()));
            }
        }
        for (k, v) in overrides {
            rebuilt.push_attribute((k.as_str(), v.as_str()));
        }
        rebuilt
    }
}

/// Write a self-closed container as an open/close pair around `nodes`.
fn write_container(writer: &mut HtmlWriter, start: BytesStart<'_>, nodes: &[Node]) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    write_nodes(writer, nodes)?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

/// Read the `id` attribute of an element, if any.
fn element_id(elem: &BytesStart<'_>) -> Option<String> {
    elem.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"id")
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}
