//! recanon — canonical metadata records from harvested XML.
//!
//! Batch tool that walks folders of harvested metadata records (DataCite,
//! Dublin Core, DDI 2.5), reconciles the structural ambiguity of generic
//! XML-to-tree conversion, and writes one schema-stable JSON document per
//! record. This crate exposes the batch pipeline as a public module so that
//! integration tests can drive it directly.
//!
//! # Architecture
//!
//! ```text
//! discover ──► to_tree ──► (schema mapper) ──► Normalizer ──► JSON out
//!   ingest       ingest        schemas            core
//! ```
//!
//! The engine in `recanon-core` is pure and per-record; everything that
//! touches the filesystem or decides batch policy lives here.

pub mod pipeline;

pub use pipeline::{run, BatchOptions, BatchSummary, SourceSchema};
