//! Dublin Core → DataCite resource mapping.
//!
//! Field mapping for `oai_dc` records:
//!
//! | DC element | DataCite target |
//! |------------|-----------------|
//! | `identifier` containing "doi" | `identifier[@identifierType=DOI]`, prefixes stripped |
//! | other `identifier` | `alternateIdentifiers` (type `Other`) |
//! | `title`, `subject` | `titles` / `subjects`, `xml:lang` preserved |
//! | `creator` | `creators/creator/creatorName` |
//! | `publisher` | `publisher` |
//! | first `date` | `publicationYear` (leading four digits) |
//! | `description` | `descriptions` (type `Abstract`) |
//! | `coverage` | `descriptions` (type `Other`) |

use serde_json::{json, Map, Value};

use crate::{
    container, find_all, leaf, leaf_lang, leaf_text, typed_leaf, warn_missing_mandatory, year_from,
};

pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

fn dc(name: &str) -> String {
    format!("{DC_NS}:{name}")
}

/// Map the parsed tree of one Dublin Core record onto a compact-keyed
/// DataCite resource tree.
pub fn to_resource(document: &Value) -> Value {
    let mut resource = Map::new();

    // identifier: any DC identifier mentioning "doi" becomes the DOI (the
    // last one wins, as repositories list the preferred form last); the rest
    // become alternate identifiers.
    let mut doi: Option<String> = None;
    let mut alternates: Vec<&str> = Vec::new();
    for entry in find_all(document, &dc("identifier")) {
        let Some(text) = leaf_text(entry) else { continue };
        if text.to_lowercase().contains("doi") {
            doi = Some(clean_doi(text));
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

    let titles = tagged_leaves(document, &dc("title"));
    if !titles.is_empty() {
        resource.insert("titles".to_string(), container("title", titles));
    }

    let creators: Vec<Value> = find_all(document, &dc("creator"))
        .into_iter()
        .filter_map(|entry| {
            let text = leaf_text(entry)?;
            Some(json!({"creatorName": leaf(text, leaf_lang(entry))}))
        })
        .collect();
    if !creators.is_empty() {
        resource.insert("creators".to_string(), container("creator", creators));
    }

    let subjects = tagged_leaves(document, &dc("subject"));
    if !subjects.is_empty() {
        resource.insert("subjects".to_string(), container("subject", subjects));
    }

    if let Some(publisher) = find_all(document, &dc("publisher"))
        .into_iter()
        .find_map(leaf_text)
    {
        resource.insert("publisher".to_string(), Value::String(publisher.to_string()));
    }

    if let Some(year) = find_all(document, &dc("date"))
        .first()
        .and_then(|entry| leaf_text(entry))
        .and_then(year_from)
    {
        resource.insert("publicationYear".to_string(), Value::String(year.to_string()));
    }

    // descriptions: abstracts first, then coverage as type Other.
    let mut descriptions: Vec<Value> = find_all(document, &dc("description"))
        .into_iter()
        .filter_map(|entry| {
            let text = leaf_text(entry)?;
            Some(typed_leaf(text, "descriptionType", "Abstract", leaf_lang(entry)))
        })
        .collect();
    descriptions.extend(find_all(document, &dc("coverage")).into_iter().filter_map(
        |entry| {
            let text = leaf_text(entry)?;
            Some(typed_leaf(text, "descriptionType", "Other", None))
        },
    ));
    if !descriptions.is_empty() {
        resource.insert(
            "descriptions".to_string(),
            container("description", descriptions),
        );
    }

    warn_missing_mandatory(&resource, "dc");
    Value::Object(resource)
}

/// Map every entry of a repeating DC element to a language-tagged leaf.
fn tagged_leaves(document: &Value, key: &str) -> Vec<Value> {
    find_all(document, key)
        .into_iter()
        .filter_map(|entry| Some(leaf(leaf_text(entry)?, leaf_lang(entry))))
        .collect()
}

/// Strip resolver and scheme prefixes from a DOI-carrying identifier.
fn clean_doi(text: &str) -> String {
    text.replace("https://doi.org/", "").replace("doi:", "")
}
