//! Taleo API client.
//!
//! Owns the session and turns HTTP responses into resources. Every JSON
//! response is validated against the `{response, status}` envelope before
//! its payload is used; downloads are passed through untouched.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::config::{ClientConfig, Credentials};
use crate::download::Download;
use crate::envelope::{entity_attributes, take_array, take_object, Envelope};
use crate::error::{Result, TaleoError};
use crate::relationship::{Cardinality, Relationship, ResourceKind};
use crate::resource::{Related, Resource};
use crate::search::{Pagination, SearchResultSet};
use crate::session::Session;
use crate::transport::Transport;

/// Taleo API client.
///
/// Handles the session and every request made on behalf of resources.
/// Resources keep a clone of the client that created them; clones share the
/// connection pool and the session, so logging in or out through any clone
/// is seen by all of them.
///
/// # Example
///
/// ```no_run
/// use taleo::{Credentials, TaleoClient, EMPLOYEE};
///
/// # async fn example() -> taleo::Result<()> {
/// let client = TaleoClient::new("https://ch.tbe.taleo.net/CH07/ats/api/v1")?;
/// client
///     .login(&Credentials::new("ACME", "api-user", "secret"))
///     .await?;
///
/// let employee = client.fetch_object(&EMPLOYEE, 42).await?;
/// println!("{}", employee.field("firstName")?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TaleoClient {
    transport: Transport,
    session: Arc<RwLock<Session>>,
}

impl fmt::Debug for TaleoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaleoClient")
            .field("base_url", &self.transport.base_url().as_str())
            .field("session", &self.session())
            .finish_non_exhaustive()
    }
}

/// `login` payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    auth_token: String,
}

/// `search` payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    pagination: Pagination,
    #[serde(default)]
    search_results: Vec<Value>,
}

impl TaleoClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `TALEO_API_URL` is not set.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create an unauthenticated client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Create an unauthenticated client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(&config)?,
            session: Arc::new(RwLock::new(Session::Unauthenticated)),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &url::Url {
        self.transport.base_url()
    }

    /// Snapshot of the current session state.
    pub fn session(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    fn token(&self) -> Option<String> {
        self.session().token().map(str::to_string)
    }

    fn set_session(&self, session: Session) {
        tracing::debug!(?session, "session transition");
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Log in and keep the issued token for subsequent requests.
    ///
    /// Calling it again re-authenticates and replaces the token.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::AuthenticationError`] if the credentials are
    /// rejected, or a transport error if the request fails.
    #[tracing::instrument(skip(self, credentials), fields(user = %credentials.user_name))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let response = self
            .transport
            .post("login", Some(credentials), None)
            .await?;

        let payload = match self.read_envelope(response).await {
            Ok(payload) => payload,
            Err(TaleoError::ApiError { detail, .. }) => {
                return Err(TaleoError::AuthenticationError(detail.to_string()));
            }
            Err(e) => return Err(e),
        };

        let login: LoginResponse = serde_json::from_value(payload)?;
        self.set_session(Session::Authenticated {
            token: login.auth_token,
        });
        tracing::info!("logged in");
        Ok(())
    }

    /// Invalidate the session token.
    ///
    /// The client is unauthenticated afterwards whatever the outcome of the
    /// request, which is issued even when no session exists.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let token = self.token();
        self.set_session(Session::Unauthenticated);

        let response = self
            .transport
            .post::<()>("logout", None, token.as_deref())
            .await?;
        self.read_envelope(response).await?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Fetch one object of `kind` by ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaleoError::ApiError`] if the envelope reports failure,
    /// [`TaleoError::MissingField`] if the payload lacks the kind's
    /// identifying field, or a transport error.
    #[tracing::instrument(skip(self, kind, id), fields(kind = kind.name, id = %id))]
    pub async fn fetch_object(
        &self,
        kind: &'static ResourceKind,
        id: impl fmt::Display,
    ) -> Result<Resource> {
        let path = format!(
            "object/{}/{}",
            kind.name,
            urlencoding::encode(&id.to_string())
        );

        let mut payload = self.get_payload(&path).await?;
        let attributes = take_object(&mut payload, kind.name)?;
        Resource::new(kind, attributes, self.clone())
    }

    /// Fetch the resource(s) behind a relationship URL.
    ///
    /// To-one relationships read the object stored under the target kind's
    /// name; to-many relationships read the array stored under the
    /// relationship's collection key, preserving server order.
    #[tracing::instrument(skip(self, relationship), fields(relationship = relationship.name()))]
    pub async fn fetch_related(&self, url: &str, relationship: &Relationship) -> Result<Related> {
        let target = relationship.target();
        let mut payload = self.get_payload(url).await?;

        match relationship.cardinality() {
            Cardinality::One => {
                let attributes = take_object(&mut payload, target.name)?;
                let resource = Resource::new(target, attributes, self.clone())?;
                Ok(Related::One(Box::new(resource)))
            }
            Cardinality::Many => {
                let items = take_array(&mut payload, &relationship.envelope_key())?;
                let resources = self.wrap_all(target, items)?;
                tracing::debug!(count = resources.len(), "resolved collection");
                Ok(Related::Many(resources))
            }
        }
    }

    /// Fetch one page of a search over `kind`.
    ///
    /// `start` is 1-based; `limit` is the page size.
    #[tracing::instrument(skip(self, kind), fields(kind = kind.name))]
    pub async fn search(
        &self,
        kind: &'static ResourceKind,
        start: u32,
        limit: u32,
    ) -> Result<SearchResultSet> {
        let path = format!("object/{}/search", kind.name);
        let token = self.token();
        let response = self
            .transport
            .get_with_query(&path, &[("start", start), ("limit", limit)], token.as_deref())
            .await?;
        let payload = self.read_envelope(response).await?;
        self.search_results(kind, start, limit, payload)
    }

    /// Follow a pagination link returned by a previous search.
    pub(crate) async fn search_at(
        &self,
        kind: &'static ResourceKind,
        link: &str,
    ) -> Result<SearchResultSet> {
        let url = self.transport.resolve(link)?;
        let param = |name: &str| -> Result<u32> {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .and_then(|(_, v)| v.parse().ok())
                .ok_or_else(|| {
                    TaleoError::MalformedResponse(format!("pagination link has no '{name}': {url}"))
                })
        };
        let (start, limit) = (param("start")?, param("limit")?);

        let payload = self.get_payload(url.as_str()).await?;
        self.search_results(kind, start, limit, payload)
    }

    fn search_results(
        &self,
        kind: &'static ResourceKind,
        start: u32,
        limit: u32,
        payload: Value,
    ) -> Result<SearchResultSet> {
        let SearchResponse {
            pagination,
            search_results,
        } = serde_json::from_value(payload)?;

        let items = self.wrap_all(kind, search_results)?;
        Ok(SearchResultSet::new(kind, start, limit, pagination, items))
    }

    /// Download raw content from a URL.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails or the server answers
    /// with a non-success status.
    #[tracing::instrument(skip(self))]
    pub async fn download(&self, url: &str) -> Result<Download> {
        let token = self.token();
        let response = self.transport.get(url, token.as_deref()).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(Download::new(response));
        }

        // Failed downloads still come back as envelopes; surface their detail.
        let body = response.text().await.map_err(TaleoError::HttpError)?;
        self.decode_envelope(status, &body)?;
        Err(TaleoError::UnexpectedStatus {
            status_code: status.as_u16(),
            body,
        })
    }

    fn wrap_all(&self, kind: &'static ResourceKind, items: Vec<Value>) -> Result<Vec<Resource>> {
        items
            .into_iter()
            .map(|item| Resource::new(kind, entity_attributes(kind, item)?, self.clone()))
            .collect()
    }

    async fn get_payload(&self, target: &str) -> Result<Value> {
        let token = self.token();
        let response = self.transport.get(target, token.as_deref()).await?;
        self.read_envelope(response).await
    }

    /// Validate a response envelope and return its payload.
    async fn read_envelope(&self, response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await.map_err(TaleoError::HttpError)?;
        self.decode_envelope(status, &body)
    }

    fn decode_envelope(&self, status: StatusCode, body: &str) -> Result<Value> {
        if status == StatusCode::UNAUTHORIZED {
            self.set_session(Session::Unauthenticated);
            return Err(TaleoError::AuthenticationError(Self::error_message(
                body, status,
            )));
        }

        let envelope: Envelope = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(TaleoError::ParseError(e)),
            Err(_) => {
                return Err(TaleoError::UnexpectedStatus {
                    status_code: status.as_u16(),
                    body: body.to_string(),
                })
            }
        };

        envelope.into_payload(Some(status.as_u16()))
    }

    /// Extract a readable message from a rejected request's body.
    fn error_message(body: &str, status: StatusCode) -> String {
        let detail = serde_json::from_str::<Envelope>(body)
            .ok()
            .map(|envelope| envelope.status.detail);

        match detail {
            Some(Value::Object(map)) => {
                let message = map
                    .get("errormessage")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                message.unwrap_or_else(|| Value::Object(map).to_string())
            }
            Some(detail) if !detail.is_null() => detail.to_string(),
            _ if body.is_empty() => format!("HTTP {status}"),
            _ => body.to_string(),
        }
    }
}
