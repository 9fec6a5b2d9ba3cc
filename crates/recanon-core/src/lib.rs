//! recanon-core — canonical metadata record normalization engine.
//!
//! This crate reconciles the structural ambiguity a generic XML-to-tree
//! conversion leaves behind (one element vs. many siblings, bare text vs.
//! text-plus-attributes) into one predictable shape per logical field. It is
//! pure: no I/O, no shared state, safe to call concurrently across records.
//!
//! # Architecture
//!
//! ```text
//! raw field ──► ShapeCoercer ──► LeafHarmonizer ──► CanonicalRecord
//!                                                        ▲
//! record ─────► IdentifierExtractor (DOI / URL) ─────────┘
//! ```
//!
//! All concrete key strings (namespace-qualified field names, attribute keys,
//! wrapper paths) come from an injected [`Profile`], so the same engine
//! serves multiple source dialects. A record either normalizes completely or
//! fails closed with a single [`NormalizationFailure`].

pub mod error;
pub mod harmonize;
pub mod identifier;
pub mod normalizer;
pub mod profile;
pub mod shape;
pub mod types;

pub use error::{FieldError, HarmonizeError, NormalizationFailure, ShapeError};
pub use harmonize::harmonize;
pub use identifier::extract_identifier;
pub use normalizer::Normalizer;
pub use profile::{AttributeMapping, CreatorKeys, IdentifierKeys, Profile, ProfileSet, RepeatingKeys};
pub use shape::{coerce, Shape};
pub use types::{CanonicalRecord, HarmonizedItem, ATTR_PREFIX, TEXT_KEY};
