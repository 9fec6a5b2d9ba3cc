//! Domain-specific assertion macros for recanon harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! normalization invariant was violated, without each test hand-rolling the
//! serde round-trip.

use recanon_core::{CanonicalRecord, HarmonizedItem, NormalizationFailure};

/// Assert that a sequence of harmonized items equals an expected JSON array.
///
/// ```rust
/// assert_items!(canonical.titles, serde_json::json!([{"title": "T"}]));
/// ```
#[macro_export]
macro_rules! assert_items {
    ($items:expr, $expected:expr) => {{
        let actual = serde_json::to_value(&$items).expect("harmonized items serialize");
        let expected: serde_json::Value = $expected;
        if actual != expected {
            panic!(
                "assert_items! failed:\n  expected: {}\n  actual:   {}",
                expected, actual
            );
        }
    }};
}

/// Assert that normalization failed and that the failure names the expected
/// field; evaluates to the failure for further inspection.
///
/// ```rust
/// let failure = assert_failure_field!(normalizer.normalize(&record), "subjects");
/// ```
#[macro_export]
macro_rules! assert_failure_field {
    ($result:expr, $field:expr) => {{
        match $result {
            Ok(record) => panic!(
                "assert_failure_field! failed: expected a NormalizationFailure on {:?}, \
                 got a canonical record: {:?}",
                $field, record
            ),
            Err(failure) => {
                if failure.field != $field {
                    panic!(
                        "assert_failure_field! failed:\n  expected field: {:?}\n  actual field:   {:?}\n  failure: {}",
                        $field, failure.field, failure
                    );
                }
                failure
            }
        }
    }};
}

/// Assert that a harmonized item does *not* carry a key (whitelisting check).
#[macro_export]
macro_rules! assert_item_lacks {
    ($item:expr, $key:expr) => {{
        let item: &recanon_core::HarmonizedItem = &$item;
        if item.contains_key($key) {
            panic!(
                "assert_item_lacks! failed: key {:?} should have been dropped.\n  item: {:?}",
                $key, item
            );
        }
    }};
}

/// Serialize a canonical record back to a JSON value for whole-record
/// comparisons.
pub fn canonical_json(record: &CanonicalRecord) -> serde_json::Value {
    serde_json::to_value(record).expect("canonical record serializes")
}

/// Multiset fingerprint of harmonized items: serialized forms, sorted.
/// Two sequences with the same fingerprint hold the same items, order aside.
pub fn item_multiset(items: &[HarmonizedItem]) -> Vec<String> {
    let mut serialized: Vec<String> = items
        .iter()
        .map(|item| serde_json::to_string(item).expect("harmonized item serializes"))
        .collect();
    serialized.sort();
    serialized
}

/// Render a failure the way the batch driver would log it, so tests can
/// check that the offending record and field are identifiable.
pub fn failure_log_line(failure: &NormalizationFailure) -> String {
    format!("{failure} (raw: {})", failure.raw)
}
