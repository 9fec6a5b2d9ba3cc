//! recanon-ingest — source record ingestion for recanon.
//!
//! Turns harvested XML files into the loosely-typed trees the normalization
//! engine consumes: [`files::discover`] finds the records, [`xml::to_tree`]
//! converts one record. Nothing here interprets metadata semantics; that is
//! the engine's job.

pub mod files;
pub mod xml;

pub use xml::{to_tree, XmlError};
