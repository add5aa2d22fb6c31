//! Base resource: raw attributes plus lazily resolved relationships.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::client::TaleoClient;
use crate::download::Download;
use crate::error::{Result, TaleoError};
use crate::relationship::{Cardinality, DownloadSource, Relationship, ResourceKind};

/// Reserved attribute holding a resource's relationship URLs.
pub const RELATIONSHIP_URLS_FIELD: &str = "relationshipUrls";

/// A resolved relationship.
#[derive(Debug, Clone)]
pub enum Related {
    One(Box<Resource>),
    Many(Vec<Resource>),
}

impl Related {
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::One(_) => Cardinality::One,
            Self::Many(_) => Cardinality::Many,
        }
    }

    pub fn as_one(&self) -> Option<&Resource> {
        match self {
            Self::One(resource) => Some(resource.as_ref()),
            Self::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Resource]> {
        match self {
            Self::One(_) => None,
            Self::Many(resources) => Some(resources.as_slice()),
        }
    }
}

/// One fetched remote entity.
///
/// Attributes are immutable once fetched. Relationships are resolved on first
/// access through [`get`](Resource::get) and cached for the lifetime of this
/// value; the cache is never invalidated, so a fresh copy of a relationship
/// requires fetching the owning resource again.
#[derive(Clone)]
pub struct Resource {
    kind: &'static ResourceKind,
    id: Value,
    attributes: Map<String, Value>,
    relationship_urls: HashMap<String, String>,
    client: TaleoClient,
    relationship_cache: HashMap<&'static str, Related>,
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &self.kind.name)
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("cached", &self.relationship_cache.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// Serializes as the raw attributes, as received from the API.
impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

impl Resource {
    /// Wrap decoded attributes as a resource of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::MissingField`] if the kind's identifying field
    /// is absent.
    pub fn new(
        kind: &'static ResourceKind,
        attributes: Map<String, Value>,
        client: TaleoClient,
    ) -> Result<Self> {
        let id = attributes
            .get(kind.id_field)
            .cloned()
            .ok_or_else(|| TaleoError::MissingField {
                kind: kind.name,
                field: kind.id_field.to_string(),
            })?;

        let relationship_urls = match attributes.get(RELATIONSHIP_URLS_FIELD) {
            Some(Value::Object(urls)) => urls
                .iter()
                .filter_map(|(name, url)| Some((name.clone(), url.as_str()?.to_string())))
                .collect(),
            _ => HashMap::new(),
        };

        Ok(Self {
            kind,
            id,
            attributes,
            relationship_urls,
            client,
            relationship_cache: HashMap::new(),
        })
    }

    pub fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    /// Value of the identifying field.
    pub fn id(&self) -> &Value {
        &self.id
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn relationship_urls(&self) -> &HashMap<String, String> {
        &self.relationship_urls
    }

    pub fn client(&self) -> &TaleoClient {
        &self.client
    }

    /// Project a field from the raw attributes.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::MissingField`] if the attribute is absent.
    pub fn field(&self, name: &str) -> Result<&Value> {
        self.attributes
            .get(name)
            .ok_or_else(|| TaleoError::MissingField {
                kind: self.kind.name,
                field: name.to_string(),
            })
    }

    /// Project a field and decode it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::MissingField`] if the attribute is absent and
    /// [`TaleoError::InvalidField`] if it does not decode into `T`.
    pub fn field_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.field(name)?;
        T::deserialize(value).map_err(|source| TaleoError::InvalidField {
            kind: self.kind.name,
            field: name.to_string(),
            source,
        })
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Whether `relationshipUrls` has an entry under `key`.
    pub fn has_relationship_url(&self, key: &str) -> bool {
        self.relationship_urls.contains_key(key)
    }

    /// Whether a declared relationship can be resolved. Never fetches.
    pub fn has_relationship(&self, name: &str) -> bool {
        self.kind
            .relationship(name)
            .and_then(|r| r.resolve_url(&self.relationship_urls))
            .is_some()
    }

    /// Whether a relationship has already been resolved.
    pub fn is_cached(&self, name: &str) -> bool {
        self.relationship_cache.contains_key(name)
    }

    /// Resolve a declared relationship, fetching it on first access.
    ///
    /// Later calls return the cached value without a request.
    ///
    /// # Errors
    ///
    /// - [`TaleoError::UnknownRelationship`] if `name` is not declared
    /// - [`TaleoError::MissingRelationship`] if this resource has no URL for it
    /// - any error from [`TaleoClient::fetch_related`]
    #[tracing::instrument(skip(self), fields(kind = self.kind.name, id = %self.id))]
    pub async fn get(&mut self, name: &str) -> Result<&Related> {
        let relationship = self.kind.lookup(name)?;

        if self.relationship_cache.contains_key(relationship.name()) {
            tracing::debug!("relationship cache hit");
        } else {
            let related = self.resolve(relationship).await?;
            self.relationship_cache.insert(relationship.name(), related);
        }

        Ok(&self.relationship_cache[relationship.name()])
    }

    /// Resolve a to-one relationship.
    pub async fn one(&mut self, name: &str) -> Result<&Resource> {
        let relationship = self.kind.lookup(name)?;
        let kind = self.kind.name;

        match self.get(name).await? {
            Related::One(resource) => Ok(resource.as_ref()),
            Related::Many(_) => Err(TaleoError::CardinalityMismatch {
                kind,
                name: relationship.name(),
                expected: Cardinality::One.as_str(),
            }),
        }
    }

    /// Resolve a to-many relationship.
    pub async fn many(&mut self, name: &str) -> Result<&[Resource]> {
        let relationship = self.kind.lookup(name)?;
        let kind = self.kind.name;

        match self.get(name).await? {
            Related::Many(resources) => Ok(resources.as_slice()),
            Related::One(_) => Err(TaleoError::CardinalityMismatch {
                kind,
                name: relationship.name(),
                expected: Cardinality::Many.as_str(),
            }),
        }
    }

    async fn resolve(&self, relationship: &Relationship) -> Result<Related> {
        let url = relationship
            .resolve_url(&self.relationship_urls)
            .ok_or_else(|| TaleoError::MissingRelationship {
                kind: self.kind.name,
                name: relationship.name().to_string(),
            })?;

        self.client.fetch_related(&url, relationship).await
    }

    /// The download URL of a downloadable kind, if present.
    pub fn download_url(&self) -> Option<&str> {
        match self.kind.download? {
            DownloadSource::Attribute(field) => self.attributes.get(field)?.as_str(),
            DownloadSource::RelationshipUrl(key) => {
                self.relationship_urls.get(key).map(String::as_str)
            }
        }
    }

    /// Whether [`download`](Resource::download) can succeed. Never fetches.
    pub fn can_download(&self) -> bool {
        self.download_url().is_some()
    }

    /// Download this resource's content.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::DownloadUnavailable`] without making a request
    /// when [`can_download`](Resource::can_download) is false.
    pub async fn download(&self) -> Result<Download> {
        let url = self
            .download_url()
            .ok_or_else(|| self.download_unavailable())?;
        self.client.download(url).await
    }

    /// Download the content behind a `relationshipUrls` entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::DownloadUnavailable`] without making a request
    /// when the entry is absent.
    pub async fn download_relationship(&self, key: &str) -> Result<Download> {
        let url = self
            .relationship_urls
            .get(key)
            .ok_or_else(|| self.download_unavailable())?;
        self.client.download(url).await
    }

    fn download_unavailable(&self) -> TaleoError {
        TaleoError::DownloadUnavailable {
            kind: self.kind.name,
            id: match &self.id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}
