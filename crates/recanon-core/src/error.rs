//! Error taxonomy for the normalization engine.
//!
//! [`ShapeError`] and [`HarmonizeError`] are local to one field's processing.
//! They never escape the engine: the normalizer catches them at its boundary
//! and wraps them into a single [`NormalizationFailure`] that names the
//! offending field and carries the raw value verbatim, so the batch driver
//! can log-and-skip without re-parsing the source record.

use serde_json::Value;
use thiserror::Error;

/// A field's raw value matched none of the recognized shapes
/// (absent / single item / keyed collection / sequence).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A bare scalar arrived where a field container was expected.
    #[error("field is a bare {kind}, not a container of `{subfield}` items")]
    ScalarContainer {
        subfield: String,
        kind: &'static str,
    },
    /// A sequence element is not a `{subfield: …}` wrapper. Upstream parsers
    /// do not all guarantee wrapper-shaped sequence elements, so this is
    /// checked rather than assumed.
    #[error("sequence element {index} is missing the `{subfield}` wrapper key")]
    MalformedWrapper { subfield: String, index: usize },
}

/// A leaf value was neither a bare string nor a structured `{#text, @…}` object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarmonizeError {
    /// The wrapper handed to the harmonizer is not a mapping at all.
    #[error("item wrapper is a {0}, not a mapping")]
    MalformedItem(&'static str),
    /// The wrapper does not contain the expected subfield key.
    #[error("item has no `{0}` subfield")]
    MissingSubfield(String),
    /// The subfield's value is some third thing (number, sequence, null, …).
    #[error("`{subfield}` is a {kind}, neither a bare string nor a structured leaf")]
    UnsupportedLeaf {
        subfield: String,
        kind: &'static str,
    },
}

/// Everything that can sink a single record.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Harmonize(#[from] HarmonizeError),
    /// `publicationYear` must be a bare string when present; anything else is
    /// a schema violation, not something to coerce.
    #[error("publicationYear is a {0}, not a bare string")]
    NonStringYear(&'static str),
    /// The record itself is not a mapping, so no field can be read from it.
    #[error("record is a {0}, not a mapping")]
    NotARecord(&'static str),
    /// A wrapper element named on the profile's resource path is absent.
    #[error("document has no `{0}` element on the resource path")]
    MissingWrapper(String),
}

/// The single structured failure reported for a record that did not
/// normalize. Never a partial record: the whole call fails closed.
///
/// Callers are expected to log and skip, not halt the batch.
#[derive(Debug, Error)]
#[error("field `{field}` failed to normalize: {kind}")]
pub struct NormalizationFailure {
    /// Concrete key of the offending field (profile key, not logical name).
    pub field: String,
    /// The offending raw value, cloned verbatim for diagnosis. `Null` when
    /// the failure is about an absent value.
    pub raw: Value,
    #[source]
    pub kind: FieldError,
}

impl NormalizationFailure {
    pub(crate) fn new(field: &str, raw: Option<&Value>, kind: FieldError) -> Self {
        Self {
            field: field.to_string(),
            raw: raw.cloned().unwrap_or(Value::Null),
            kind,
        }
    }
}
