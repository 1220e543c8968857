//! Authorized user endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use super::{not_found, SharedState};

/// GET /user
pub async fn get_user(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    match &state.user {
        Some(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        None => not_found("User", "me"),
    }
}
