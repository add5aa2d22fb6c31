//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Taleo API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::resource::RELATIONSHIP_URLS_FIELD;

/// What a relationship or download path serves.
#[derive(Debug, Clone)]
pub enum MockRelation {
    /// A single stored object, served as `{kind: attributes}`.
    Object { kind: String, id: u64 },
    /// A list of stored objects, served as `{key: [{kind: attributes}, ...]}`.
    Collection {
        key: String,
        kind: String,
        ids: Vec<u64>,
    },
    /// Raw content, served outside the JSON envelope.
    Content {
        content_type: String,
        body: Vec<u8>,
    },
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// URL the server listens on; relative URLs in fixtures are served
    /// prefixed with it.
    pub base_url: String,

    /// Objects indexed by kind, then ID.
    pub objects: HashMap<String, BTreeMap<u64, Value>>,

    /// Relationship and download paths, relative to `object/`
    /// (e.g. "candidate/1/resume").
    pub relations: HashMap<String, MockRelation>,

    /// Token issued by `login`.
    pub issued_token: String,

    /// Optional authentication token. If set, object requests must carry
    /// it in the `authToken` cookie.
    pub required_token: Option<String>,

    /// Optional accepted credentials as (org code, user name, password).
    pub credentials: Option<(String, String, String)>,

    /// Paths of every request received, in order.
    pub requests: Vec<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            issued_token: "webapi-12345".to_string(),
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an object; its ID is read from `id_field`.
    ///
    /// # Panics
    ///
    /// Panics if the object has no numeric `id_field`.
    pub fn with_object(mut self, kind: &str, id_field: &str, attributes: Value) -> Self {
        let id = attributes
            .get(id_field)
            .and_then(Value::as_u64)
            .unwrap_or_else(|| panic!("{kind} fixture has no numeric '{id_field}'"));
        self.insert_object(kind, id, attributes);
        self
    }

    /// Add an object under an explicit ID.
    pub fn insert_object(&mut self, kind: &str, id: u64, attributes: Value) {
        self.objects
            .entry(kind.to_string())
            .or_default()
            .insert(id, attributes);
    }

    /// Serve `relation` at `object/{path}`.
    pub fn with_relation(mut self, path: &str, relation: MockRelation) -> Self {
        self.insert_relation(path, relation);
        self
    }

    pub fn insert_relation(&mut self, path: &str, relation: MockRelation) {
        self.relations.insert(path.to_string(), relation);
    }

    /// Require this token on object requests.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.issued_token = token.to_string();
        self.required_token = Some(token.to_string());
        self
    }

    /// Only accept these credentials on `login`.
    pub fn with_credentials(mut self, org_code: &str, user_name: &str, password: &str) -> Self {
        self.credentials = Some((
            org_code.to_string(),
            user_name.to_string(),
            password.to_string(),
        ));
        self
    }

    /// Get an object by kind and ID.
    pub fn get_object(&self, kind: &str, id: u64) -> Option<&Value> {
        self.objects.get(kind)?.get(&id)
    }

    /// All objects of a kind, ordered by ID.
    pub fn list_objects(&self, kind: &str) -> Vec<&Value> {
        self.objects
            .get(kind)
            .map(|objects| objects.values().collect())
            .unwrap_or_default()
    }

    /// Get the relation served at `object/{path}`.
    pub fn get_relation(&self, path: &str) -> Option<&MockRelation> {
        self.relations.get(path)
    }

    /// Number of requests received for a path.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests.iter().filter(|p| p.as_str() == path).count()
    }

    /// Prefix relative URLs of an object with the server URL.
    pub fn render(&self, attributes: &Value) -> Value {
        let mut rendered = attributes.clone();

        if let Some(Value::Object(urls)) = rendered.get_mut(RELATIONSHIP_URLS_FIELD) {
            for url in urls.values_mut() {
                *url = Value::String(self.absolute_url(url.as_str().unwrap_or_default()));
            }
        }
        if let Some(url) = rendered.get_mut("downloadUrl") {
            *url = Value::String(self.absolute_url(url.as_str().unwrap_or_default()));
        }

        rendered
    }

    /// Absolute URL for a path relative to the server root.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }
}
