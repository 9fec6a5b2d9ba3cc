//! DDI 2.5 codebook → DataCite resource mapping.
//!
//! Field mapping:
//!
//! | DDI element | DataCite target |
//! |-------------|-----------------|
//! | `IDNo[@agency=doi]` | `identifier[@identifierType=DOI]` |
//! | other `IDNo` | `alternateIdentifiers` (type `Other`) |
//! | `titl` | `titles`, duplicate (text, lang) pairs dropped |
//! | `AuthEnty` | `creators/creator/creatorName` |
//! | `topcClas` | `subjects` |
//! | `distrbtr` | `publisher` |
//! | first `distDate` | `publicationYear` (`date` attribute preferred over text) |
//! | `abstract` | `descriptions` (type `Abstract`) |
//!
//! DDI exports routinely repeat the study title per language *and* per
//! section, so titles are the one field deduplicated during mapping.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::{
    container, find_all, leaf, leaf_attr, leaf_lang, leaf_text, typed_leaf,
    warn_missing_mandatory, year_from,
};

pub const DDI_NS: &str = "ddi:codebook:2_5";

fn ddi(name: &str) -> String {
    format!("{DDI_NS}:{name}")
}

/// Map the parsed tree of one DDI 2.5 record onto a compact-keyed DataCite
/// resource tree.
pub fn to_resource(document: &Value) -> Value {
    let mut resource = Map::new();

    let mut doi: Option<&str> = None;
    let mut alternates: Vec<&str> = Vec::new();
    for entry in find_all(document, &ddi("IDNo")) {
        let Some(text) = leaf_text(entry) else { continue };
        let agency = leaf_attr(entry, "agency").unwrap_or_default();
        if agency.eq_ignore_ascii_case("doi") {
            doi = Some(text);
        } else {
            alternates.push(text);
        }
    }
    if let Some(doi) = doi {
        resource.insert(
            "identifier".to_string(),
            json!({"@identifierType": "DOI", "#text": doi}),
        );
    } else if !alternates.is_empty() {
        let alternates: Vec<Value> = alternates
            .iter()
            .map(|text| json!({"@alternateIdentifierType": "Other", "#text": text}))
            .collect();
        resource.insert(
            "alternateIdentifiers".to_string(),
            container("alternateIdentifier", alternates),
        );
    }

    let mut seen_titles: HashSet<(String, String)> = HashSet::new();
    let titles: Vec<Value> = find_all(document, &ddi("titl"))
        .into_iter()
        .filter_map(|entry| {
            let text = leaf_text(entry)?;
            let lang = leaf_lang(entry);
            let key = (text.to_string(), lang.unwrap_or_default().to_string());
            seen_titles.insert(key).then(|| leaf(text, lang))
        })
        .collect();
    if !titles.is_empty() {
        resource.insert("titles".to_string(), container("title", titles));
    }

    let creators: Vec<Value> = find_all(document, &ddi("AuthEnty"))
        .into_iter()
        .filter_map(|entry| {
            let text = leaf_text(entry)?;
            Some(json!({"creatorName": leaf(text, leaf_lang(entry))}))
        })
        .collect();
    if !creators.is_empty() {
        resource.insert("creators".to_string(), container("creator", creators));
    }

    let subjects: Vec<Value> = find_all(document, &ddi("topcClas"))
        .into_iter()
        .filter_map(|entry| Some(leaf(leaf_text(entry)?, leaf_lang(entry))))
        .collect();
    if !subjects.is_empty() {
        resource.insert("subjects".to_string(), container("subject", subjects));
    }

    if let Some(publisher) = find_all(document, &ddi("distrbtr"))
        .into_iter()
        .find_map(leaf_text)
    {
        resource.insert("publisher".to_string(), Value::String(publisher.to_string()));
    }

    if let Some(year) = find_all(document, &ddi("distDate"))
        .first()
        .and_then(|entry| leaf_attr(entry, "date").or_else(|| leaf_text(entry)))
        .and_then(year_from)
    {
        resource.insert("publicationYear".to_string(), Value::String(year.to_string()));
    }

    let descriptions: Vec<Value> = find_all(document, &ddi("abstract"))
        .into_iter()
        .filter_map(|entry| {
            let text = leaf_text(entry)?;
            Some(typed_leaf(text, "descriptionType", "Abstract", leaf_lang(entry)))
        })
        .collect();
    if !descriptions.is_empty() {
        resource.insert(
            "descriptions".to_string(),
            container("description", descriptions),
        );
    }

    warn_missing_mandatory(&resource, "ddi25");
    Value::Object(resource)
}
