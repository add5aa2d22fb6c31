//! HTTP transport.
//!
//! Resolves paths against the fixed base URL, attaches the session token and
//! performs the round-trip. Envelope decoding lives in the client.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::config::{AuthScheme, ClientConfig};
use crate::error::{Result, TaleoError};

/// Low-level request issuer shared by every clone of a client.
#[derive(Clone)]
pub(crate) struct Transport {
    http: Client,
    base_url: Arc<Url>,
    auth_scheme: Arc<AuthScheme>,
}

impl Transport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        // Ensure base URL ends with / so relative paths join beneath it
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(TaleoError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            auth_scheme: Arc::new(config.auth_scheme.clone()),
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path relative to the base URL. Absolute URLs pass through.
    pub(crate) fn resolve(&self, target: &str) -> Result<Url> {
        Ok(self.base_url.join(target)?)
    }

    /// Make a GET request.
    pub(crate) async fn get(&self, target: &str, token: Option<&str>) -> Result<Response> {
        let request = self.request(Method::GET, target, token)?;
        Self::send(request).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        target: &str,
        query: &Q,
        token: Option<&str>,
    ) -> Result<Response> {
        let request = self.request(Method::GET, target, token)?.query(query);
        Self::send(request).await
    }

    /// Make a POST request, with a JSON body when one is given.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        target: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Response> {
        let mut request = self.request(Method::POST, target, token)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::send(request).await
    }

    fn request(&self, method: Method, target: &str, token: Option<&str>) -> Result<RequestBuilder> {
        let url = self.resolve(target)?;
        tracing::debug!(%method, %url, authenticated = token.is_some(), "sending request");

        let request = self.http.request(method, url);
        Ok(match token {
            Some(token) => self.authorize(request, token),
            None => request,
        })
    }

    fn authorize(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        match self.auth_scheme.as_ref() {
            AuthScheme::Cookie(name) => request.header(COOKIE, format!("{name}={token}")),
            AuthScheme::Header(name) => request.header(name.as_str(), token),
            AuthScheme::Bearer => request.header(AUTHORIZATION, format!("Bearer {token}")),
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(TaleoError::HttpError)
    }
}
