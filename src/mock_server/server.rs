//! Mock Taleo API server.
//!
//! Provides an axum-based HTTP server that simulates the Taleo REST API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock Taleo API server for testing.
///
/// The server runs in the background and can be used to test the Taleo client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let url = format!("http://{}", addr);
        state.base_url = url.clone();

        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `TaleoClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of requests the server received for `path`
    /// (e.g. "object/employee/42/packet").
    pub async fn request_count(&self, path: &str) -> usize {
        self.state.read().await.request_count(path)
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    pub fn default_state() -> MockState {
        Fixtures::default_scenario().into_state(MockState::new())
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Session routes
            .route("/login", post(handlers::login))
            .route("/logout", post(handlers::logout))
            // Object, search and relationship routes
            .route("/object/:kind/:id", get(handlers::get_object))
            .route("/object/:kind/:id/*rest", get(handlers::get_relation))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router(state: MockState) -> Router {
        let mut state = state;
        state.base_url = "http://mock.test".to_string();
        MockServer::create_router(state.shared())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_object_is_enveloped_with_absolute_urls() {
        let app = router(MockServer::default_state());

        let (status, body) = get_json(app, "/object/employee/42").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"]["success"], true);
        assert_eq!(body["response"]["employee"]["employeeId"], 42);
        assert_eq!(
            body["response"]["employee"]["relationshipUrls"]["packets"],
            "http://mock.test/object/employee/42/packet"
        );
    }

    #[tokio::test]
    async fn test_unknown_object_fails_envelope() {
        let app = router(MockServer::default_state());

        let (status, body) = get_json(app, "/object/employee/1000").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"]["success"], false);
        assert!(body["status"]["detail"]["errormessage"]
            .as_str()
            .unwrap()
            .contains("1000"));
    }

    #[tokio::test]
    async fn test_search_last_page_links() {
        let app = router(MockServer::default_state());

        let (_, body) = get_json(app, "/object/employee/search?start=91&limit=10").await;
        let response = &body["response"];

        assert_eq!(response["pagination"]["total"], 100);
        assert_eq!(response["searchResults"].as_array().unwrap().len(), 10);
        assert_eq!(
            response["searchResults"][0]["employee"]["employeeId"],
            91
        );
        assert_eq!(
            response["pagination"]["previous"],
            "http://mock.test/object/employee/search?start=81&limit=10"
        );
        assert!(response["pagination"].get("next").is_none());
    }

    #[tokio::test]
    async fn test_collection_items_are_wrapped() {
        let app = router(MockServer::default_state());

        let (_, body) = get_json(app, "/object/employee/3/packet").await;
        let packets = body["response"]["activityPackets"].as_array().unwrap();

        assert_eq!(packets.len(), 5);
        assert!(packets[0]["packet"]["activityPacketId"].is_u64());
    }

    #[tokio::test]
    async fn test_required_token_rejects_missing_cookie() {
        let app = router(MockServer::default_state().with_required_token("secret"));

        let (status, body) = get_json(app.clone(), "/object/employee/1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"]["success"], false);

        let response = app
            .oneshot(
                Request::get("/object/employee/1")
                    .header("cookie", "authToken=secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
