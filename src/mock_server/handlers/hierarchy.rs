//! Team, space and list endpoint handlers.
//!
//! Collections come wrapped in their plural key, single spaces and lists
//! come back bare, and a single team is wrapped in `team`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use super::{not_found, rows, SharedState};
use crate::mock_server::state::Table;

/// GET /team
pub async fn list_teams(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(json!({ "teams": rows(state.all(Table::Teams)) }))
}

/// GET /team/{id}
pub async fn get_team(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.read().await;

    match state.get(Table::Teams, &id) {
        Some(team) => (StatusCode::OK, Json(json!({ "team": team.data }))).into_response(),
        None => not_found("Team", &id),
    }
}

/// GET /team/{id}/space
pub async fn list_spaces(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.read().await;

    if state.get(Table::Teams, &id).is_none() {
        return not_found("Team", &id);
    }
    Json(json!({ "spaces": rows(state.children(Table::Spaces, &id)) })).into_response()
}

/// GET /space/{id}
pub async fn get_space(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.read().await;

    match state.get(Table::Spaces, &id) {
        Some(space) => Json(Value::Object(space.data.clone())).into_response(),
        None => not_found("Space", &id),
    }
}

/// GET /space/{id}/list
pub async fn list_lists(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.read().await;

    if state.get(Table::Spaces, &id).is_none() {
        return not_found("Space", &id);
    }
    Json(json!({ "lists": rows(state.children(Table::Lists, &id)) })).into_response()
}

/// GET /list/{id}
pub async fn get_list(State(state): State<SharedState>, Path(id): Path<String>) -> impl IntoResponse {
    let state = state.read().await;

    match state.get(Table::Lists, &id) {
        Some(list) => Json(Value::Object(list.data.clone())).into_response(),
        None => not_found("List", &id),
    }
}
