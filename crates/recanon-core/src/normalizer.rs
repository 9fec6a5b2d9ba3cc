//! Record normalization — the engine's top-level orchestration.
//!
//! [`Normalizer::normalize`] applies shape coercion and leaf harmonization to
//! every repeating field, typed extraction to the identifier, and assembles
//! one [`CanonicalRecord`]. Field-level [`ShapeError`]s and
//! [`HarmonizeError`]s are caught here and converted into a single
//! [`NormalizationFailure`] naming the offending field: the call either
//! returns a complete record or fails closed, never a partial record.
//!
//! [`ShapeError`]: crate::error::ShapeError
//!
//! The engine is purely functional over one input value: no shared state, no
//! I/O, nothing to synchronize. Callers may normalize any number of records
//! concurrently.

use serde_json::Value;

use crate::error::{FieldError, HarmonizeError, NormalizationFailure};
use crate::harmonize::harmonize;
use crate::identifier::extract_identifier;
use crate::profile::{CreatorKeys, Profile, RepeatingKeys};
use crate::shape::{coerce, value_kind};
use crate::types::{CanonicalRecord, HarmonizedItem};

/// The normalization engine, bound to one schema [`Profile`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    profile: Profile,
}

impl Normalizer {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Normalize a whole harvested document by first drilling through the
    /// profile's `resource_path` wrapper keys, then normalizing the resource.
    ///
    /// A missing wrapper element is a malformed document and fails the whole
    /// record.
    pub fn normalize_document(
        &self,
        document: &Value,
    ) -> Result<CanonicalRecord, NormalizationFailure> {
        let mut node = document;
        for key in &self.profile.resource_path {
            node = node.get(key).ok_or_else(|| {
                NormalizationFailure::new(key, Some(node), FieldError::MissingWrapper(key.clone()))
            })?;
        }
        self.normalize(node)
    }

    /// Normalize one resource tree into a [`CanonicalRecord`].
    ///
    /// Each field is processed under its own guard so a failure is attributed
    /// to the concrete field key and raw value that caused it.
    pub fn normalize(&self, record: &Value) -> Result<CanonicalRecord, NormalizationFailure> {
        if !record.is_object() {
            return Err(NormalizationFailure::new(
                "record",
                Some(record),
                FieldError::NotARecord(value_kind(record)),
            ));
        }

        let doi = extract_identifier(record, &self.profile.identifier, "DOI");
        let url = extract_identifier(record, &self.profile.identifier, "URL");
        let titles = self.repeating(record, &self.profile.titles)?;
        let subjects = self.repeating(record, &self.profile.subjects)?;
        let creators = self.creators(record)?;
        let descriptions = self.repeating(record, &self.profile.descriptions)?;
        let publication_year = self.publication_year(record)?;

        Ok(CanonicalRecord {
            doi,
            url,
            titles,
            subjects,
            creators,
            descriptions,
            publication_year,
        })
    }

    fn repeating(
        &self,
        record: &Value,
        keys: &RepeatingKeys,
    ) -> Result<Vec<HarmonizedItem>, NormalizationFailure> {
        let raw = record.get(&keys.container);
        let wrappers = coerce(raw, &keys.item)
            .map_err(|e| NormalizationFailure::new(&keys.container, raw, e.into()))?;
        wrappers
            .iter()
            .map(|wrapper| {
                harmonize(wrapper, &keys.item, &keys.attributes)
                    .map_err(|e| NormalizationFailure::new(&keys.container, raw, e.into()))
            })
            .collect()
    }

    fn creators(&self, record: &Value) -> Result<Vec<HarmonizedItem>, NormalizationFailure> {
        let keys = &self.profile.creators;
        let raw = record.get(&keys.container);
        let wrappers = coerce(raw, &keys.item)
            .map_err(|e| NormalizationFailure::new(&keys.container, raw, e.into()))?;
        wrappers
            .iter()
            .map(|wrapper| {
                harmonize_creator(wrapper, keys)
                    .map_err(|e| NormalizationFailure::new(&keys.container, raw, e.into()))
            })
            .collect()
    }

    fn publication_year(&self, record: &Value) -> Result<Option<String>, NormalizationFailure> {
        match record.get(&self.profile.publication_year) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(year)) => Ok(Some(year.clone())),
            Some(other) => Err(NormalizationFailure::new(
                &self.profile.publication_year,
                Some(other),
                FieldError::NonStringYear(value_kind(other)),
            )),
        }
    }
}

/// Creators nest one level deeper than the other repeating fields: the
/// wrapper holds a creator object whose name leaf is the harmonization
/// target. A bare-string name yields only the name key; extra creator keys
/// (affiliations, …) are not part of the canonical shape.
fn harmonize_creator(
    wrapper: &Value,
    keys: &CreatorKeys,
) -> Result<HarmonizedItem, HarmonizeError> {
    let creator = wrapper
        .get(&keys.item)
        .ok_or_else(|| HarmonizeError::MissingSubfield(keys.item.clone()))?;
    match creator.get(&keys.name) {
        Some(Value::String(name)) => {
            let mut harmonized = HarmonizedItem::new();
            harmonized.insert(keys.name.clone(), Value::String(name.clone()));
            Ok(harmonized)
        }
        _ => harmonize(creator, &keys.name, &keys.attributes),
    }
}
