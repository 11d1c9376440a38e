//! Minimal XML element tree built on `quick-xml`.
//!
//! Namespace prefixes are dropped from element and attribute names; the
//! service and its WSDL never reuse a local name across namespaces in the
//! places the adapter reads.

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, SoapError};

/// One XML element with its attributes, child elements and text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name, as written in the document.
    pub name: String,
    /// Attributes by local name, in document order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated text and CDATA content with references resolved.
    pub text: String,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = match unescape(&raw) {
                Ok(value) => value.into_owned(),
                Err(_) => raw.to_string(),
            };
            attributes.push((key, value));
        }
        Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        }
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Parse a document into its root element.
pub fn parse_document(source: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(XmlElement::from_start(&start)),
            Event::Empty(start) => attach(&mut stack, &mut root, XmlElement::from_start(&start))?,
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SoapError::Xml("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(current) = stack.last_mut() {
                    let name = String::from_utf8_lossy(&reference);
                    current.text.push_str(&resolve_reference(&name));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SoapError::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| SoapError::Xml("document has no root element".to_string()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(SoapError::Xml("multiple root elements".to_string())),
    }
    Ok(())
}

/// Resolve `&name;` where `name` is a predefined entity or a character reference.
fn resolve_reference(name: &str) -> String {
    if let Some(text) = resolve_predefined_entity(name) {
        return text.to_string();
    }
    let code = match name.strip_prefix('#') {
        Some(hex) if hex.starts_with('x') || hex.starts_with('X') => {
            u32::from_str_radix(&hex[1..], 16).ok()
        }
        Some(decimal) => decimal.parse::<u32>().ok(),
        None => None,
    };
    code.and_then(char::from_u32)
        .map_or_else(|| format!("&{name};"), String::from)
}

/// Convert an XML name to snake_case.
///
/// `runQueryAsAServiceResponse` becomes `run_query_as_a_service_response`,
/// `LOV` becomes `lov` and `Values_Of_Team` becomes `values_of_team`.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (index, &ch) in chars.iter().enumerate() {
        if index > 0 && ch.is_ascii_uppercase() {
            let prev = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(char::is_ascii_lowercase);
            let word_start = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if word_start {
                out.push('_');
            }
        }
        match ch {
            '-' | '.' => out.push('_'),
            other => out.push(other.to_ascii_lowercase()),
        }
    }
    out
}
