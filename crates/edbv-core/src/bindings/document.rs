//! Minimal read-only document tree used by the binding parser.
//!
//! The parser only ever needs "root -> ordered children -> named child ->
//! attribute", so that is all [`DocumentNode`] exposes. [`XmlElement`] is the
//! quick-xml backed implementation.

use crate::error::{Result, ViewerError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Read-only view of one element in a tree document.
pub trait DocumentNode {
    /// Tag name of this element.
    fn name(&self) -> &str;

    /// Direct child elements in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Value of the attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// First direct child element called `name`.
    fn child(&self, name: &str) -> Option<&Self> {
        self.children().find(|c| c.name() == name)
    }
}

/// An owned XML element: tag, attributes in source order and child elements.
///
/// Text content is dropped; binding files carry everything in attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Parse a whole document and return its root element.
    pub fn parse_str(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(parse_error(position, "multiple root elements"));
                    }
                    stack.push(element_from_start(&start, position)?);
                }
                Ok(Event::Empty(start)) => {
                    let element = element_from_start(&start, position)?;
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::End(end)) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    let Some(element) = stack.pop() else {
                        return Err(parse_error(
                            position,
                            format!("unexpected closing tag </{}>", name),
                        ));
                    };
                    if element.name != name {
                        return Err(parse_error(
                            position,
                            format!("expected </{}>, found </{}>", element.name, name),
                        ));
                    }
                    attach(&mut stack, &mut root, element, position)?;
                }
                Ok(Event::Text(text)) => {
                    if stack.is_empty() && !text.iter().all(|b| b.is_ascii_whitespace()) {
                        return Err(parse_error(position, "text outside the root element"));
                    }
                }
                Ok(Event::CData(_)) if stack.is_empty() => {
                    return Err(parse_error(position, "CDATA outside the root element"));
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions, doctype.
                Ok(_) => {}
                Err(err) => {
                    return Err(parse_error(reader.error_position() as u64, err.to_string()));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(parse_error(
                reader.buffer_position() as u64,
                format!("unclosed element <{}>", open.name),
            ));
        }

        root.ok_or_else(|| parse_error(0, "document has no root element"))
    }
}

impl DocumentNode for XmlElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn parse_error(position: u64, message: impl Into<String>) -> ViewerError {
    ViewerError::Parse {
        position,
        message: message.into(),
    }
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(&name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| parse_error(position, format!("attribute error: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| parse_error(position, format!("attribute {}: {}", key, e)))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    position: u64,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(parse_error(position, "multiple root elements"));
    }
    Ok(())
}
