//! Typed extraction of the record identifier (DOI / URL).
//!
//! The source schema models exactly one identifier element with a type
//! attribute per record; alternate identifiers live elsewhere and are not
//! searched. Absence of the element, the type attribute, or the text content
//! all yield `None` — missing identifiers are a data fact, not an error.

use serde_json::Value;

use crate::profile::IdentifierKeys;
use crate::types::TEXT_KEY;

/// Return the identifier text when the record's identifier element carries a
/// type attribute that equals `identifier_type` exactly (case-sensitive).
pub fn extract_identifier(
    record: &Value,
    keys: &IdentifierKeys,
    identifier_type: &str,
) -> Option<String> {
    let identifier = record.get(&keys.key)?.as_object()?;
    let id_type = identifier.get(&keys.type_attr)?.as_str()?;
    if id_type != identifier_type {
        return None;
    }
    Some(identifier.get(TEXT_KEY)?.as_str()?.to_string())
}
