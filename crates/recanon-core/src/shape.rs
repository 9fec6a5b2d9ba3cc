//! Shape classification and coercion — the first engine stage.
//!
//! A generic XML-to-tree conversion cannot distinguish "one element with
//! structure" from "multiple sibling elements", so the same logical field
//! arrives in one of four shapes. [`Shape`] tags a raw value once at the
//! engine boundary; [`coerce`] maps every legal shape onto one predictable
//! form: an ordered sequence of `{subfield: item}` wrappers.

use serde_json::{Map, Value};

use crate::error::ShapeError;

/// Structural tag of a raw value, assigned once and dispatched on exhaustively.
///
/// A `Mapping` is read as a keyed collection by the coercer and as a
/// structured leaf by the harmonizer; the two are indistinguishable without
/// knowing which stage is looking, so the tag records the structural fact
/// only.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    /// Missing or explicit null. Optionality is not an error.
    Absent,
    /// A bare scalar (string, number, boolean).
    Scalar(&'a Value),
    /// A keyed object: keyed collection, single-item container, or structured leaf.
    Mapping(&'a Map<String, Value>),
    /// An ordered sequence of sibling items.
    Sequence(&'a [Value]),
}

impl<'a> Shape<'a> {
    /// Classify a raw field value (`None` = the key was not present at all).
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Shape::Absent,
            Some(Value::Object(map)) => Shape::Mapping(map),
            Some(Value::Array(seq)) => Shape::Sequence(seq),
            Some(scalar) => Shape::Scalar(scalar),
        }
    }
}

/// Human-readable tag of a JSON value's type, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Coerce a raw field value of unknown shape into an ordered sequence of
/// `{subfield: item}` wrappers.
///
/// - absent input yields an empty sequence, never an error;
/// - a sequence passes through once every element is verified to be
///   wrapper-shaped;
/// - a mapping contributes its *values* in iteration order: a value that is
///   itself a sequence contributes one wrapper per element, a value that
///   already is a `{subfield: …}` wrapper passes through as-is, and any other
///   value is wrapped whole;
/// - a bare scalar where a container was expected is a [`ShapeError`].
pub fn coerce(raw: Option<&Value>, subfield: &str) -> Result<Vec<Value>, ShapeError> {
    match Shape::of(raw) {
        Shape::Absent => Ok(Vec::new()),
        Shape::Sequence(seq) => {
            for (index, element) in seq.iter().enumerate() {
                let is_wrapper = element
                    .as_object()
                    .is_some_and(|map| map.contains_key(subfield));
                if !is_wrapper {
                    return Err(ShapeError::MalformedWrapper {
                        subfield: subfield.to_string(),
                        index,
                    });
                }
            }
            Ok(seq.to_vec())
        }
        Shape::Mapping(map) => {
            let mut wrappers = Vec::new();
            for value in map.values() {
                match value {
                    Value::Array(items) => {
                        wrappers.extend(items.iter().map(|item| wrap(subfield, item)));
                    }
                    Value::Object(inner) if inner.contains_key(subfield) => {
                        wrappers.push(value.clone());
                    }
                    item => wrappers.push(wrap(subfield, item)),
                }
            }
            Ok(wrappers)
        }
        Shape::Scalar(scalar) => Err(ShapeError::ScalarContainer {
            subfield: subfield.to_string(),
            kind: value_kind(scalar),
        }),
    }
}

fn wrap(subfield: &str, item: &Value) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(subfield.to_string(), item.clone());
    Value::Object(wrapper)
}
