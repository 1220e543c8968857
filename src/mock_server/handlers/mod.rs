//! HTTP request handlers for the mock server.

pub mod hierarchy;
pub mod tasks;
pub mod user;

pub use hierarchy::*;
pub use tasks::*;
pub use user::*;

use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::state::{MockState, Record};

pub(crate) type SharedState = Arc<RwLock<MockState>>;

/// ClickUp's error body for a missing resource.
pub(crate) fn not_found(what: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "err": format!("{what} not found: {id}"),
            "ECODE": "ITEM_013"
        })),
    )
        .into_response()
}

pub(crate) fn rows(records: Vec<&Record>) -> Vec<Value> {
    records
        .into_iter()
        .map(|record| Value::Object(record.data.clone()))
        .collect()
}
