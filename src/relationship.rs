//! Declarative relationship registry.
//!
//! Every resource type is described by a static [`ResourceKind`]: its object
//! type name, its identifying field, the relationships it declares and where
//! its downloadable content lives. Relationships are fixed when the kind is
//! defined and shared read-only by every resource of that kind.
//!
//! ```ignore
//! static RELATIONSHIPS: [Relationship; 2] = [
//!     Relationship::one("employee", &EMPLOYEE),
//!     Relationship::many("attachments", &ATTACHMENT).singular("attachment"),
//! ];
//!
//! pub static CANDIDATE: ResourceKind =
//!     ResourceKind::new("candidate", "candId").with_relationships(&RELATIONSHIPS);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, TaleoError};

/// Whether a relationship resolves to one resource or an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Many => "many",
        }
    }
}

/// Where a relationship's URL comes from in `relationshipUrls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// The URL stored under this key.
    Key(&'static str),
    /// The URL stored under `key`, with its last path segment replaced.
    Sibling {
        key: &'static str,
        segment: &'static str,
    },
}

/// Where a downloadable resource keeps its download URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadSource {
    /// A plain attribute of the resource (e.g. `downloadUrl`).
    Attribute(&'static str),
    /// An entry of `relationshipUrls` (e.g. `formDownloadUrl`).
    RelationshipUrl(&'static str),
}

/// Static description of a resource type.
pub struct ResourceKind {
    /// Object type name used in paths and as the envelope key.
    pub name: &'static str,
    /// Attribute that identifies an instance; required in every payload.
    pub id_field: &'static str,
    /// Declared relationships.
    pub relationships: &'static [Relationship],
    /// Download URL location, for downloadable kinds.
    pub download: Option<DownloadSource>,
}

impl ResourceKind {
    pub const fn new(name: &'static str, id_field: &'static str) -> Self {
        Self {
            name,
            id_field,
            relationships: &[],
            download: None,
        }
    }

    pub const fn with_relationships(mut self, relationships: &'static [Relationship]) -> Self {
        self.relationships = relationships;
        self
    }

    pub const fn with_download(mut self, source: DownloadSource) -> Self {
        self.download = Some(source);
        self
    }

    /// Find a declared relationship by name.
    pub fn relationship(&self, name: &str) -> Option<&'static Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Find a declared relationship by name, failing for undeclared names.
    pub fn lookup(&self, name: &str) -> Result<&'static Relationship> {
        self.relationship(name)
            .ok_or_else(|| TaleoError::UnknownRelationship {
                kind: self.name,
                name: name.to_string(),
            })
    }
}

// Kinds reference each other. Debug prints a relationship's target by name
// only, and PartialEq compares kinds by name.
impl fmt::Debug for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceKind")
            .field("name", &self.name)
            .field("id_field", &self.id_field)
            .field("relationships", &self.relationships)
            .field("download", &self.download)
            .finish()
    }
}

impl PartialEq for ResourceKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ResourceKind {}

/// One declared relationship of a resource kind.
#[derive(Clone, Copy)]
pub struct Relationship {
    name: &'static str,
    target: &'static ResourceKind,
    cardinality: Cardinality,
    url: UrlSource,
    singular: Option<&'static str>,
    collection_key: Option<&'static str>,
}

impl Relationship {
    /// Declare a to-one relationship. The URL key defaults to `name`.
    pub const fn one(name: &'static str, target: &'static ResourceKind) -> Self {
        Self {
            name,
            target,
            cardinality: Cardinality::One,
            url: UrlSource::Key(name),
            singular: None,
            collection_key: None,
        }
    }

    /// Declare a to-many relationship. The URL key defaults to `name`.
    ///
    /// The collection key is the plural of [`singular`](Self::singular) when
    /// one is given, otherwise `name` itself, which is already plural.
    pub const fn many(name: &'static str, target: &'static ResourceKind) -> Self {
        Self {
            cardinality: Cardinality::Many,
            ..Self::one(name, target)
        }
    }

    /// Read the URL from a different `relationshipUrls` key.
    pub const fn url_key(mut self, key: &'static str) -> Self {
        self.url = UrlSource::Key(key);
        self
    }

    /// Build the URL from another relationship URL by swapping its last segment.
    pub const fn derived_from(mut self, key: &'static str, segment: &'static str) -> Self {
        self.url = UrlSource::Sibling { key, segment };
        self
    }

    /// Singular noun the collection key is pluralized from.
    pub const fn singular(mut self, singular: &'static str) -> Self {
        self.singular = Some(singular);
        self
    }

    /// Explicit envelope key holding the collection array.
    pub const fn collection_key(mut self, key: &'static str) -> Self {
        self.collection_key = Some(key);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn target(&self) -> &'static ResourceKind {
        self.target
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn url_source(&self) -> UrlSource {
        self.url
    }

    /// Envelope key of the collection array for to-many relationships.
    pub fn envelope_key(&self) -> Cow<'static, str> {
        match self.cardinality {
            Cardinality::One => Cow::Borrowed(self.target.name),
            Cardinality::Many => match self.collection_key {
                Some(key) => Cow::Borrowed(key),
                None => match self.singular {
                    Some(singular) => Cow::Owned(pluralize(singular)),
                    None => Cow::Borrowed(self.name),
                },
            },
        }
    }

    /// Look up this relationship's URL among a resource's relationship URLs.
    pub fn resolve_url(&self, urls: &HashMap<String, String>) -> Option<String> {
        match self.url {
            UrlSource::Key(key) => urls.get(key).cloned(),
            UrlSource::Sibling { key, segment } => urls
                .get(key)
                .and_then(|url| url.rsplit_once('/'))
                .map(|(base, _)| format!("{base}/{segment}")),
        }
    }
}

impl fmt::Debug for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relationship")
            .field("name", &self.name)
            .field("target", &self.target.name)
            .field("cardinality", &self.cardinality)
            .field("url", &self.url)
            .field("envelope_key", &self.envelope_key())
            .finish()
    }
}

/// English plural following the API's collection key naming.
pub fn pluralize(word: &str) -> String {
    let ends_with_consonant_y = word.ends_with('y')
        && word
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| !"aeiouAEIOU".contains(c));

    if ends_with_consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        format!("{word}es")
    } else if word.is_empty() {
        String::new()
    } else {
        format!("{word}s")
    }
}
