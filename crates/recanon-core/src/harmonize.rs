//! Leaf harmonization — the second engine stage.
//!
//! A leaf element may arrive as a bare string or as a structured object
//! carrying `#text` plus attribute keys. [`harmonize`] collapses either form
//! into one flat [`HarmonizedItem`], keeping only the attributes a caller
//! declared in its attribute table. Undeclared attributes are dropped: the
//! canonical shape is lossy by design.

use serde_json::Value;

use crate::error::HarmonizeError;
use crate::profile::AttributeMapping;
use crate::shape::{value_kind, Shape};
use crate::types::{HarmonizedItem, TEXT_KEY};

/// Collapse one `{subfield: leaf}` wrapper into a flat harmonized item.
///
/// - a bare string leaf returns the wrapper unchanged (already canonical);
/// - a structured leaf yields `{subfield: #text}` when text is present, plus
///   one `canonical: value` entry per declared attribute found on the leaf;
///   attributes that are absent (or explicit null) are omitted entirely;
/// - anything else is a [`HarmonizeError`] — the caller decides whether that
///   sinks the record, never this layer.
pub fn harmonize(
    item: &Value,
    subfield: &str,
    attributes: &[AttributeMapping],
) -> Result<HarmonizedItem, HarmonizeError> {
    let wrapper = item
        .as_object()
        .ok_or_else(|| HarmonizeError::MalformedItem(value_kind(item)))?;
    let leaf = wrapper
        .get(subfield)
        .ok_or_else(|| HarmonizeError::MissingSubfield(subfield.to_string()))?;

    match Shape::of(Some(leaf)) {
        Shape::Scalar(Value::String(_)) => Ok(wrapper.clone()),
        Shape::Mapping(leaf_map) => {
            let mut harmonized = HarmonizedItem::new();
            if let Some(text) = leaf_map.get(TEXT_KEY) {
                harmonized.insert(subfield.to_string(), text.clone());
            }
            for mapping in attributes {
                match leaf_map.get(&mapping.raw) {
                    None | Some(Value::Null) => {}
                    Some(value) => {
                        harmonized.insert(mapping.canonical.clone(), value.clone());
                    }
                }
            }
            Ok(harmonized)
        }
        _ => Err(HarmonizeError::UnsupportedLeaf {
            subfield: subfield.to_string(),
            kind: value_kind(leaf),
        }),
    }
}
