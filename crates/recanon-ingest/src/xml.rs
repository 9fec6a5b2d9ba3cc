//! Namespace-aware XML → tree conversion.
//!
//! Produces the loosely-typed nested structure the normalization engine
//! consumes, following the conventions of generic XML-to-object converters:
//!
//! - element keys are `namespaceURI:localName` (prefix-free; unbound names
//!   stay bare),
//! - attributes become `@`-prefixed keys, namespace-qualified when bound,
//! - element text is the node value for attribute-less leaves and lives
//!   under `#text` otherwise; whitespace-only text is dropped,
//! - repeated sibling tags collapse into an ordered sequence,
//! - empty elements become null,
//! - `xmlns` declarations are consumed by resolution, never emitted.
//!
//! Cardinality is therefore *not* explicit in the output: one `<title>` gives
//! an object, two give a sequence. Resolving that ambiguity is the engine's
//! job, not the converter's.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use recanon_core::{ATTR_PREFIX, TEXT_KEY};
use serde_json::{Map, Value};
use thiserror::Error;

/// Conversion failure. Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    #[error("malformed XML near byte {position}: {message}")]
    Malformed { position: u64, message: String },
    #[error("document has no root element")]
    NoRoot,
}

impl XmlError {
    fn at(position: u64, error: impl std::fmt::Display) -> Self {
        XmlError::Malformed {
            position,
            message: error.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert one XML document into its tree form.
pub fn to_tree(xml: &str) -> Result<Value, XmlError> {
    let mut reader = NsReader::from_str(xml);
    // Stack of open elements; index 0 is a virtual document node whose
    // children map becomes the result.
    let mut stack: Vec<OpenElement> = vec![OpenElement::document()];

    loop {
        let resolved = match reader.read_resolved_event() {
            Ok(resolved) => resolved,
            Err(error) => return Err(XmlError::at(reader.buffer_position(), error)),
        };
        match resolved {
            (ns, Event::Start(start)) => {
                let key = qualified_name(ns, start.local_name().into_inner());
                let element = open_element(&reader, key, &start)?;
                stack.push(element);
            }
            (ns, Event::Empty(start)) => {
                let key = qualified_name(ns, start.local_name().into_inner());
                let element = open_element(&reader, key, &start)?;
                close_element(&mut stack, element, reader.buffer_position())?;
            }
            (_, Event::End(_)) => {
                // The reader has already verified tag balance.
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::at(reader.buffer_position(), "unbalanced end tag"))?;
                close_element(&mut stack, element, reader.buffer_position())?;
            }
            (_, Event::Text(text)) => {
                let text = text
                    .decode()
                    .map_err(|e| XmlError::at(reader.buffer_position(), e))?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            (_, Event::CData(cdata)) => {
                let bytes = cdata.into_inner();
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            (_, Event::GeneralRef(entity)) => {
                let name = String::from_utf8_lossy(&entity).into_owned();
                if let Some(open) = stack.last_mut() {
                    match resolve_entity(&name) {
                        Some(expansion) => open.text.push_str(&expansion),
                        // Unknown entity: keep the reference verbatim rather
                        // than dropping characters.
                        None => {
                            open.text.push('&');
                            open.text.push_str(&name);
                            open.text.push(';');
                        }
                    }
                }
            }
            (_, Event::Eof) => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    let document = stack
        .pop()
        .ok_or_else(|| XmlError::at(reader.buffer_position(), "unbalanced document"))?;
    if !stack.is_empty() {
        return Err(XmlError::at(reader.buffer_position(), "unclosed element"));
    }
    if document.children.is_empty() {
        return Err(XmlError::NoRoot);
    }
    Ok(Value::Object(document.children))
}

// ---------------------------------------------------------------------------
// Element bookkeeping
// ---------------------------------------------------------------------------

struct OpenElement {
    key: String,
    children: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn document() -> Self {
        Self {
            key: String::new(),
            children: Map::new(),
            text: String::new(),
        }
    }

    /// Collapse the finished element into its tree value.
    fn into_value(self) -> Value {
        let mut children = self.children;
        let text = self.text.trim();
        if children.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        } else {
            if !text.is_empty() {
                children.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
            }
            Value::Object(children)
        }
    }
}

fn open_element<R>(
    reader: &NsReader<R>,
    key: String,
    start: &BytesStart<'_>,
) -> Result<OpenElement, XmlError> {
    let mut children = Map::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| XmlError::at(reader.buffer_position(), e))?;
        let raw_name = attribute.key.as_ref();
        if raw_name == b"xmlns" || raw_name.starts_with(b"xmlns:") {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attribute.key);
        let attr_key = format!(
            "{ATTR_PREFIX}{}",
            qualified_name(ns, local.into_inner())
        );
        let value = attribute
            .unescape_value()
            .map_err(|e| XmlError::at(reader.buffer_position(), e))?;
        children.insert(attr_key, Value::String(value.into_owned()));
    }
    Ok(OpenElement {
        key,
        children,
        text: String::new(),
    })
}

/// Insert a finished element into its parent, collapsing repeated sibling
/// tags into an ordered sequence.
fn close_element(
    stack: &mut Vec<OpenElement>,
    element: OpenElement,
    position: u64,
) -> Result<(), XmlError> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| XmlError::at(position, "element closed outside the document"))?;
    let key = element.key.clone();
    let value = element.into_value();
    match parent.children.get_mut(&key) {
        None => {
            parent.children.insert(key, value);
        }
        Some(Value::Array(siblings)) => siblings.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Name and entity resolution
// ---------------------------------------------------------------------------

fn qualified_name(ns: ResolveResult<'_>, local: &[u8]) -> String {
    let local = String::from_utf8_lossy(local);
    match ns {
        ResolveResult::Bound(namespace) => {
            format!("{}:{local}", String::from_utf8_lossy(namespace.0))
        }
        ResolveResult::Unbound => local.into_owned(),
        // Undeclared prefix: keep it verbatim so the problem stays visible.
        ResolveResult::Unknown(prefix) => {
            format!("{}:{local}", String::from_utf8_lossy(&prefix))
        }
    }
}

/// Expand the predefined XML entities and numeric character references.
fn resolve_entity(name: &str) -> Option<String> {
    match name {
        "amp" => Some("&".to_string()),
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "apos" => Some("'".to_string()),
        "quot" => Some("\"".to_string()),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code).map(String::from)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
