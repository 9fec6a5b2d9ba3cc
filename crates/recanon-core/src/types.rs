//! Core types for recanon-core.
//!
//! This module defines the data structures shared across the engine: the
//! [`CanonicalRecord`] output shape, the per-entry [`HarmonizedItem`], and the
//! key sentinels the upstream XML-to-tree conversion uses for element text
//! and attributes.

use serde::Serialize;

/// Key under which a parsed element's text content lives when the element
/// also carries attributes. Matches the convention of the generic XML-to-tree
/// conversion feeding the engine.
pub const TEXT_KEY: &str = "#text";

/// Prefix marking attribute keys in a parsed tree (`@identifierType`,
/// `@http://www.w3.org/XML/1998/namespace:lang`, …).
pub const ATTR_PREFIX: &str = "@";

/// One harmonized entry of a repeating field: a flat mapping holding at most
/// one text key (the subfield name) plus any whitelisted attribute keys.
///
/// Attributes absent from the source item are omitted entirely, never written
/// as null. Key order is insertion order (`serde_json` is built with
/// `preserve_order`), so serialized entries read text-first.
pub type HarmonizedItem = serde_json::Map<String, serde_json::Value>;

/// The canonical, schema-stable form of one metadata record.
///
/// Constructed fresh per input record by the normalizer and immutable once
/// returned. Sequence fields preserve source-document order and are not
/// deduplicated; optional fields serialize as absent keys, not nulls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    /// Text of the record's identifier element when its type attribute is `DOI`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Text of the record's identifier element when its type attribute is `URL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub titles: Vec<HarmonizedItem>,
    pub subjects: Vec<HarmonizedItem>,
    pub creators: Vec<HarmonizedItem>,
    pub descriptions: Vec<HarmonizedItem>,
    /// Copied through verbatim; the source schema guarantees a bare string here.
    #[serde(rename = "publicationYear", skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<String>,
}
