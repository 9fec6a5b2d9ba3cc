//! Schema profiles — the injected key tables that bind the engine to one
//! upstream parser dialect.
//!
//! The engine never hardcodes namespace URIs: every concrete key string (the
//! `titles` container, the `title` wrapper, attribute keys, the wrapper path
//! down to the resource element) is configuration, so the same engine serves
//! DataCite, Dublin Core, DDI, and repository-specific dialects without code
//! changes.
//!
//! [`ProfileSet::load`] reads `~/.config/recanon/profiles.toml`, creating it
//! with the built-in profiles if it does not yet exist. [`ProfileSet::defaults`]
//! returns the same profiles without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

// `datacite` matches namespace-aware XML-to-tree conversion of harvested
// OAI records; `datacite-compact` matches namespace-stripped trees and is
// also the shape the DC/DDI schema mappers emit.
const DEFAULT_PROFILES: &str = r#"
[datacite]
resource_path = [
    "http://www.openarchives.org/OAI/2.0/:record",
    "http://www.openarchives.org/OAI/2.0/:metadata",
    "http://datacite.org/schema/kernel-4:resource",
]
publication_year = "http://datacite.org/schema/kernel-4:publicationYear"

[datacite.identifier]
key = "http://datacite.org/schema/kernel-4:identifier"
type_attr = "@identifierType"

[datacite.titles]
container = "http://datacite.org/schema/kernel-4:titles"
item = "http://datacite.org/schema/kernel-4:title"
attributes = [
    { raw = "@http://www.w3.org/XML/1998/namespace:lang", canonical = "lang" },
    { raw = "@titleType", canonical = "titleType" },
]

[datacite.subjects]
container = "http://datacite.org/schema/kernel-4:subjects"
item = "http://datacite.org/schema/kernel-4:subject"
attributes = [
    { raw = "@http://www.w3.org/XML/1998/namespace:lang", canonical = "lang" },
]

[datacite.creators]
container = "http://datacite.org/schema/kernel-4:creators"
item = "http://datacite.org/schema/kernel-4:creator"
name = "http://datacite.org/schema/kernel-4:creatorName"
attributes = [
    { raw = "@nameType", canonical = "nameType" },
]

[datacite.descriptions]
container = "http://datacite.org/schema/kernel-4:descriptions"
item = "http://datacite.org/schema/kernel-4:description"
attributes = [
    { raw = "@descriptionType", canonical = "descriptionType" },
    { raw = "@http://www.w3.org/XML/1998/namespace:lang", canonical = "lang" },
]

[datacite-compact]
resource_path = ["record", "metadata", "resource"]
publication_year = "publicationYear"

[datacite-compact.identifier]
key = "identifier"
type_attr = "@identifierType"

[datacite-compact.titles]
container = "titles"
item = "title"
attributes = [
    { raw = "@xml:lang", canonical = "lang" },
    { raw = "@titleType", canonical = "titleType" },
]

[datacite-compact.subjects]
container = "subjects"
item = "subject"
attributes = [
    { raw = "@xml:lang", canonical = "lang" },
]

[datacite-compact.creators]
container = "creators"
item = "creator"
name = "creatorName"
attributes = [
    { raw = "@nameType", canonical = "nameType" },
]

[datacite-compact.descriptions]
container = "descriptions"
item = "description"
attributes = [
    { raw = "@descriptionType", canonical = "descriptionType" },
    { raw = "@xml:lang", canonical = "lang" },
]
"#;

// ---------------------------------------------------------------------------
// Public profile types
// ---------------------------------------------------------------------------

/// One declared attribute: the key as the parser writes it, and the key it is
/// published under in the canonical output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeMapping {
    pub raw: String,
    pub canonical: String,
}

impl AttributeMapping {
    pub fn new(raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            canonical: canonical.into(),
        }
    }
}

/// Keys for the singular typed identifier element.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentifierKeys {
    /// Key of the identifier element on the resource.
    pub key: String,
    /// Key of its type attribute (`@identifierType`).
    pub type_attr: String,
}

/// Keys for one repeating field (titles, subjects, descriptions).
#[derive(Debug, Clone, Deserialize)]
pub struct RepeatingKeys {
    /// Key of the field container on the resource (`…:titles`).
    pub container: String,
    /// Key wrapping each item (`…:title`); also the text key of the
    /// harmonized output.
    pub item: String,
    #[serde(default)]
    pub attributes: Vec<AttributeMapping>,
}

/// Keys for the creators field, whose items nest one level deeper than the
/// other repeating fields (`creator → creatorName`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatorKeys {
    pub container: String,
    pub item: String,
    /// Key of the name leaf inside each creator.
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeMapping>,
}

/// The full key table binding the engine to one upstream parser dialect.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Wrapper keys drilled through from the document root down to the
    /// resource element. Empty when callers hand over resource trees directly.
    #[serde(default)]
    pub resource_path: Vec<String>,
    pub identifier: IdentifierKeys,
    pub publication_year: String,
    pub titles: RepeatingKeys,
    pub subjects: RepeatingKeys,
    pub creators: CreatorKeys,
    pub descriptions: RepeatingKeys,
}

// ---------------------------------------------------------------------------
// ProfileSet
// ---------------------------------------------------------------------------

/// All known profiles, keyed by name.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    profiles: HashMap<String, Profile>,
}

impl ProfileSet {
    /// Load from `~/.config/recanon/profiles.toml`, layered on top of the
    /// built-in profiles. Creates the file with the defaults if it does not
    /// exist, so users have a template to edit.
    pub fn load() -> anyhow::Result<Self> {
        let path = profiles_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_PROFILES.trim_start())?;
        }

        let profiles = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_PROFILES,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()?;

        Ok(Self { profiles })
    }

    /// Return the built-in profiles without touching the filesystem.
    pub fn defaults() -> Self {
        let profiles = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_PROFILES,
                config::FileFormat::Toml,
            ))
            .build()
            .expect("built-in profiles must be valid TOML")
            .try_deserialize()
            .expect("built-in profiles must deserialize correctly");

        Self { profiles }
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Profile names, sorted, for "unknown profile" error messages.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn profiles_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("recanon")
        .join("profiles.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
