//! Task and comment endpoint handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};

use super::{not_found, rows, SharedState};
use crate::mock_server::state::Table;

/// GET /list/{id}/task
///
/// Archived tasks are only returned for `archived=1` (or `true`), and then
/// exclusively.
pub async fn list_tasks(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let state = state.read().await;

    if state.get(Table::Lists, &id).is_none() {
        return not_found("List", &id);
    }

    let archived = query
        .get("archived")
        .is_some_and(|value| value == "1" || value == "true");

    let tasks: Vec<Value> = rows(state.children(Table::Tasks, &id))
        .into_iter()
        .filter(|task| task["archived"].as_bool().unwrap_or(false) == archived)
        .collect();

    Json(json!({ "tasks": tasks })).into_response()
}

/// POST /list/{id}/task
pub async fn create_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if state.get(Table::Lists, &id).is_none() {
        return not_found("List", &id);
    }

    let mut task = body;
    task.entry("archived").or_insert(json!(false));
    task.insert("list".to_string(), json!({ "id": id }));

    let created = state.insert(Table::Tasks, &id, task);
    (StatusCode::OK, Json(Value::Object(created))).into_response()
}

/// GET /task/{id}
pub async fn get_task(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.read().await;

    match state.get(Table::Tasks, &id) {
        Some(task) => Json(Value::Object(task.data.clone())).into_response(),
        None => not_found("Task", &id),
    }
}

/// PUT /task/{id}
pub async fn update_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.update(Table::Tasks, &id, patch) {
        Some(task) => Json(Value::Object(task.clone())).into_response(),
        None => not_found("Task", &id),
    }
}

/// DELETE /task/{id}
pub async fn delete_task(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let mut state = state.write().await;

    if state.remove(Table::Tasks, &id) {
        Json(json!({})).into_response()
    } else {
        not_found("Task", &id)
    }
}

/// GET /task/{id}/comment
pub async fn list_comments(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.read().await;

    if state.get(Table::Tasks, &id).is_none() {
        return not_found("Task", &id);
    }
    Json(json!({ "comments": rows(state.children(Table::Comments, &id)) })).into_response()
}

/// POST /task/{id}/comment
///
/// Like the real API, answers with the new id and timestamps only.
pub async fn create_comment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if state.get(Table::Tasks, &id).is_none() {
        return not_found("Task", &id);
    }

    let created = state.insert(Table::Comments, &id, body);
    let comment_id = created.get("id").cloned().unwrap_or(Value::Null);

    Json(json!({
        "id": comment_id,
        "hist_id": format!("h{comment_id}"),
        "date": 1_568_036_964_079_i64
    }))
    .into_response()
}
