//! HTTP request handlers for the mock server.
//!
//! Every JSON response is wrapped in the Taleo envelope
//! `{"response": ..., "status": {"success": ..., "detail": ...}}`.

pub mod objects;
pub mod session;

pub use objects::*;
pub use session::*;

use axum::{
    http::{header::COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::config::DEFAULT_AUTH_COOKIE;
use crate::mock_server::state::MockState;

/// Successful envelope around `data`.
pub(crate) fn success(data: Value) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "response": data,
            "status": { "success": true, "detail": {} }
        })),
    )
        .into_response()
}

/// Failed envelope carrying an error message.
pub(crate) fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "response": {},
            "status": {
                "success": false,
                "detail": {
                    "errorcode": status.as_u16().to_string(),
                    "errormessage": message
                }
            }
        })),
    )
        .into_response()
}

/// Checks the session cookie when the state requires a token.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(required) = &state.required_token else {
        return Ok(());
    };

    let expected = format!("{DEFAULT_AUTH_COOKIE}={required}");
    let authorized = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .any(|cookie| cookie.trim() == expected);

    if authorized {
        Ok(())
    } else {
        Err(failure(StatusCode::UNAUTHORIZED, "Session is not valid"))
    }
}
