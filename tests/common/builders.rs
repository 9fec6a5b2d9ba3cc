//! Test builders — ergonomic constructors for compact resource trees.
//!
//! These builders are for readability in engine-level tests, not for
//! production use. They build the tree shapes the `datacite-compact` profile
//! reads, one method call per logical entry.

use serde_json::{json, Map, Value};

/// Fluent builder for a compact-keyed DataCite resource tree.
///
/// # Example
///
/// ```rust
/// let resource = ResourceBuilder::new()
///     .doi("10.5072/x")
///     .title_tagged("Naslov", "hr")
///     .title_plain("A title")
///     .year("2021")
///     .build();
/// ```
pub struct ResourceBuilder {
    resource: Map<String, Value>,
    titles: Vec<Value>,
    subjects: Vec<Value>,
    creators: Vec<Value>,
    descriptions: Vec<Value>,
}

impl ResourceBuilder {
    pub fn new() -> Self {
        Self {
            resource: Map::new(),
            titles: Vec::new(),
            subjects: Vec::new(),
            creators: Vec::new(),
            descriptions: Vec::new(),
        }
    }

    pub fn doi(mut self, text: &str) -> Self {
        self.resource.insert(
            "identifier".to_string(),
            json!({"@identifierType": "DOI", "#text": text}),
        );
        self
    }

    pub fn url(mut self, text: &str) -> Self {
        self.resource.insert(
            "identifier".to_string(),
            json!({"@identifierType": "URL", "#text": text}),
        );
        self
    }

    pub fn title_plain(mut self, text: &str) -> Self {
        self.titles.push(json!(text));
        self
    }

    pub fn title_tagged(mut self, text: &str, lang: &str) -> Self {
        self.titles.push(json!({"#text": text, "@xml:lang": lang}));
        self
    }

    pub fn title_typed(mut self, text: &str, lang: &str, title_type: &str) -> Self {
        self.titles
            .push(json!({"#text": text, "@xml:lang": lang, "@titleType": title_type}));
        self
    }

    pub fn subject(mut self, text: &str) -> Self {
        self.subjects.push(json!(text));
        self
    }

    pub fn subject_tagged(mut self, text: &str, lang: &str) -> Self {
        self.subjects.push(json!({"#text": text, "@xml:lang": lang}));
        self
    }

    pub fn creator_plain(mut self, name: &str) -> Self {
        self.creators.push(json!({"creatorName": name}));
        self
    }

    pub fn creator_typed(mut self, name: &str, name_type: &str) -> Self {
        self.creators
            .push(json!({"creatorName": {"#text": name, "@nameType": name_type}}));
        self
    }

    pub fn description(mut self, text: &str, description_type: &str) -> Self {
        self.descriptions
            .push(json!({"#text": text, "@descriptionType": description_type}));
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.resource
            .insert("publicationYear".to_string(), json!(year));
        self
    }

    /// Insert an arbitrary raw field, bypassing the shape conventions. Used
    /// to build deliberately malformed records.
    pub fn raw_field(mut self, key: &str, value: Value) -> Self {
        self.resource.insert(key.to_string(), value);
        self
    }

    pub fn build(mut self) -> Value {
        if !self.titles.is_empty() {
            self.resource
                .insert("titles".to_string(), json!({"title": self.titles}));
        }
        if !self.subjects.is_empty() {
            self.resource
                .insert("subjects".to_string(), json!({"subject": self.subjects}));
        }
        if !self.creators.is_empty() {
            self.resource
                .insert("creators".to_string(), json!({"creator": self.creators}));
        }
        if !self.descriptions.is_empty() {
            self.resource.insert(
                "descriptions".to_string(),
                json!({"description": self.descriptions}),
            );
        }
        Value::Object(self.resource)
    }
}

impl Default for ResourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The engine bound to the built-in `datacite-compact` profile.
pub fn compact_normalizer() -> recanon_core::Normalizer {
    let profile = recanon_core::ProfileSet::defaults()
        .get("datacite-compact")
        .cloned()
        .expect("built-in compact profile");
    recanon_core::Normalizer::new(profile)
}

/// The engine bound to the built-in namespace-qualified `datacite` profile.
pub fn datacite_normalizer() -> recanon_core::Normalizer {
    let profile = recanon_core::ProfileSet::defaults()
        .get("datacite")
        .cloned()
        .expect("built-in datacite profile");
    recanon_core::Normalizer::new(profile)
}
