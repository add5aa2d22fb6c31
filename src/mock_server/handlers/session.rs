//! Login and logout handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, Json};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::{failure, success};
use crate::mock_server::state::MockState;

/// Body of a login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub org_code: String,
    pub user_name: String,
    pub password: String,
}

/// POST /login
pub async fn login(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let mut state = state.write().await;
    state.requests.push("login".to_string());

    if let Some((org_code, user_name, password)) = &state.credentials {
        if (org_code, user_name, password)
            != (&request.org_code, &request.user_name, &request.password)
        {
            return failure(StatusCode::UNAUTHORIZED, "Invalid login credentials");
        }
    }

    success(json!({ "authToken": state.issued_token }))
}

/// POST /logout
pub async fn logout(State(state): State<Arc<RwLock<MockState>>>) -> Response {
    state.write().await.requests.push("logout".to_string());
    success(json!({}))
}
