//! recanon-schemas — source schema mappers for recanon.
//!
//! Harvested records arrive in more dialects than DataCite. Each mapper here
//! takes the parsed tree of one Dublin Core or DDI 2.5 record and produces a
//! DataCite-resource-shaped tree (compact keys), so every dialect flows
//! through the same normalization engine with the `datacite-compact` profile.
//!
//! Mappers are lenient by design: absent source fields are simply not mapped,
//! and a record missing a DataCite-mandatory field is logged, not rejected —
//! deciding what to do with thin records is the caller's business.

use serde_json::{json, Map, Value};

use recanon_core::TEXT_KEY;

pub mod dc;
pub mod ddi;

pub(crate) const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Fields DataCite 4 declares mandatory; mapped records missing one get a
/// warning so thin sources stay visible in the batch log.
const MANDATORY_FIELDS: &[&str] = &[
    "identifier",
    "creators",
    "titles",
    "publisher",
    "publicationYear",
];

// ---------------------------------------------------------------------------
// Tree lookup
// ---------------------------------------------------------------------------

/// Collect every entry stored under `key` anywhere in the tree, in document
/// order, flattening repeated-sibling sequences. Equivalent to a `.//key`
/// search over the source document.
pub(crate) fn find_all<'a>(tree: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(tree, key, &mut found);
    found
}

fn collect<'a>(tree: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match tree {
        Value::Object(map) => {
            for (child_key, child) in map {
                if child_key == key {
                    match child {
                        Value::Array(siblings) => found.extend(siblings.iter()),
                        other => found.push(other),
                    }
                } else {
                    collect(child, key, found);
                }
            }
        }
        Value::Array(seq) => {
            for element in seq {
                collect(element, key, found);
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Leaf helpers
// ---------------------------------------------------------------------------

/// Trimmed, non-empty text of a parsed leaf (bare string or `#text` carrier).
pub(crate) fn leaf_text(leaf: &Value) -> Option<&str> {
    let text = match leaf {
        Value::String(text) => text.as_str(),
        Value::Object(map) => map.get(TEXT_KEY)?.as_str()?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

/// `xml:lang` of a parsed leaf, when present.
pub(crate) fn leaf_lang(leaf: &Value) -> Option<&str> {
    leaf.as_object()?
        .get(&format!("@{XML_NS}:lang"))?
        .as_str()
}

/// Named attribute of a parsed leaf (`@agency`, `@date`, …).
pub(crate) fn leaf_attr<'a>(leaf: &'a Value, attr: &str) -> Option<&'a str> {
    leaf.as_object()?.get(&format!("@{attr}"))?.as_str()
}

/// Build a compact-keyed leaf: a bare string, or `{#text, @xml:lang}` when a
/// language tag survives.
pub(crate) fn leaf(text: &str, lang: Option<&str>) -> Value {
    match lang {
        None => Value::String(text.to_string()),
        Some(lang) => json!({"#text": text, "@xml:lang": lang}),
    }
}

/// Build a compact-keyed typed leaf (`{#text, @<type_attr>, @xml:lang?}`),
/// used for descriptions.
pub(crate) fn typed_leaf(text: &str, type_attr: &str, type_value: &str, lang: Option<&str>) -> Value {
    let mut map = Map::new();
    map.insert(format!("@{type_attr}"), Value::String(type_value.to_string()));
    if let Some(lang) = lang {
        map.insert("@xml:lang".to_string(), Value::String(lang.to_string()));
    }
    map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    Value::Object(map)
}

/// Wrap mapped items in their repeating-field container.
pub(crate) fn container(item_key: &str, items: Vec<Value>) -> Value {
    let mut map = Map::new();
    map.insert(item_key.to_string(), Value::Array(items));
    Value::Object(map)
}

/// First four characters of a date string, when they form a year.
pub(crate) fn year_from(date: &str) -> Option<&str> {
    let head = date.get(..4)?;
    head.bytes().all(|b| b.is_ascii_digit()).then_some(head)
}

/// Warn about absent DataCite-mandatory fields on a mapped resource.
pub(crate) fn warn_missing_mandatory(resource: &Map<String, Value>, schema: &str) {
    for field in MANDATORY_FIELDS {
        if !resource.contains_key(*field) {
            tracing::warn!(schema, field, "record is missing a DataCite-mandatory field");
        }
    }
}
