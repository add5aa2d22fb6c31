//! Object, search and relationship handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use super::{authorize, failure, success};
use crate::mock_server::state::{MockRelation, MockState};
use crate::search::{next_start, page_len, previous_start, DEFAULT_LIMIT};

/// Query parameters for searching objects.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub start: Option<u32>,
    pub limit: Option<u32>,
}

/// GET /object/{kind}/{id}
///
/// `search` is served here too since it shares the path shape.
pub async fn get_object(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((kind, id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    state.requests.push(format!("object/{kind}/{id}"));

    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if id == "search" {
        return search(&state, &kind, &query);
    }

    let object = id
        .parse::<u64>()
        .ok()
        .and_then(|id| state.get_object(&kind, id));

    match object {
        Some(attributes) => success(json!({ kind.as_str(): state.render(attributes) })),
        None => failure(
            StatusCode::NOT_FOUND,
            &format!("No {kind} found with id: {id}"),
        ),
    }
}

/// GET /object/{kind}/{id}/{rest}
pub async fn get_relation(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((kind, id, rest)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let path = format!("{kind}/{id}/{rest}");

    let mut state = state.write().await;
    state.requests.push(format!("object/{path}"));

    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_relation(&path) {
        Some(MockRelation::Object { kind, id }) => match state.get_object(kind, *id) {
            Some(attributes) => success(json!({ kind.as_str(): state.render(attributes) })),
            None => failure(StatusCode::NOT_FOUND, &format!("No {kind} found with id: {id}")),
        },
        Some(MockRelation::Collection { key, kind, ids }) => {
            let items: Vec<Value> = ids
                .iter()
                .filter_map(|id| state.get_object(kind, *id))
                .map(|attributes| wrap(kind, state.render(attributes)))
                .collect();
            success(json!({ key.as_str(): items }))
        }
        Some(MockRelation::Content { content_type, body }) => (
            StatusCode::OK,
            [(CONTENT_TYPE, content_type.clone())],
            body.clone(),
        )
            .into_response(),
        None => failure(StatusCode::NOT_FOUND, &format!("Nothing found at: {path}")),
    }
}

/// Search response for GET /object/{kind}/search.
fn search(state: &MockState, kind: &str, query: &SearchQuery) -> Response {
    let start = query.start.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let all = state.list_objects(kind);
    let total = all.len() as u64;
    let len = page_len(total, start, limit) as usize;

    let results: Vec<Value> = all
        .into_iter()
        .skip(start as usize - 1)
        .take(len)
        .map(|attributes| wrap(kind, state.render(attributes)))
        .collect();

    let link = |start: u32| {
        state.absolute_url(&format!("object/{kind}/search?start={start}&limit={limit}"))
    };

    let mut pagination = Map::new();
    pagination.insert("total".to_string(), json!(total));
    pagination.insert("self".to_string(), json!(link(start)));
    if let Some(previous) = previous_start(start, limit) {
        pagination.insert("previous".to_string(), json!(link(previous)));
    }
    if let Some(next) = next_start(total, start, limit) {
        pagination.insert("next".to_string(), json!(link(next)));
    }

    success(json!({
        "pagination": pagination,
        "searchResults": results
    }))
}

/// Collection items are wrapped in an object keyed by their kind.
fn wrap(kind: &str, attributes: Value) -> Value {
    json!({ kind: attributes })
}
