//! Mock ClickUp API server.
//!
//! Provides an axum-based HTTP server that simulates the ClickUp API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock ClickUp API server for testing.
///
/// The server runs in the background and can be used to test the client
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
    /// Start a new mock server with the default scenario.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `ClickUpClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data, or inspecting the recorded
    /// requests, during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of requests seen so far matching `"METHOD /path"`.
    pub async fn request_count(&self, request: &str) -> usize {
        self.state.read().await.request_count(request)
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/user", get(handlers::get_user))
            // Hierarchy routes
            .route("/team", get(handlers::list_teams))
            .route("/team/:id", get(handlers::get_team))
            .route("/team/:id/space", get(handlers::list_spaces))
            .route("/space/:id", get(handlers::get_space))
            .route("/space/:id/list", get(handlers::list_lists))
            .route("/list/:id", get(handlers::get_list))
            // Task routes
            .route(
                "/list/:id/task",
                get(handlers::list_tasks).post(handlers::create_task),
            )
            .route(
                "/task/:id",
                get(handlers::get_task)
                    .put(handlers::update_task)
                    .delete(handlers::delete_task),
            )
            .route(
                "/task/:id/comment",
                get(handlers::list_comments).post(handlers::create_comment),
            )
            // Health check
            .route("/health", get(health_check))
            .layer(middleware::from_fn_with_state(state.clone(), track))
            .with_state(state)
    }
}

/// Record the request and enforce the required token, if any.
async fn track(State(state): State<Arc<RwLock<MockState>>>, request: Request, next: Next) -> Response {
    let line = format!(
        "{} {}",
        request.method(),
        request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    );

    {
        let mut state = state.write().await;
        state.requests.push(line);

        if let Some(required) = &state.required_token {
            let given = request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            if given != Some(required.as_str()) {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"err": "Token invalid", "ECODE": "OAUTH_025"})),
                )
                    .into_response();
            }
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, ClickUpClient, ClickUpError, ModelKind};
    use axum::body::Body;
    use tower::ServiceExt;

    fn clickup(server: &MockServer, token: &str) -> Builder {
        let client = ClickUpClient::new(server.url()).unwrap().with_token(token);
        Builder::new().set_client(client)
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
    async fn test_router_wraps_team_collection() {
        let router = MockServer::create_router(Fixtures::default_scenario().shared());

        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/team")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["teams"][0]["name"], "Test Team");
    }

    #[tokio::test]
    async fn test_router_records_requests() {
        let state = MockState::new().shared();
        let router = MockServer::create_router(state.clone());

        router
            .oneshot(
                axum::http::Request::builder()
                    .uri("/task/missing?include_subtasks=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.requests, vec!["GET /task/missing?include_subtasks=1"]);
        assert_eq!(state.request_count("GET /task/missing"), 1);
    }

    #[tokio::test]
    async fn test_find_task_with_client() {
        let server = MockServer::start().await;

        let task = clickup(&server, "pk_test")
            .tasks()
            .unwrap()
            .find("abc1")
            .await
            .expect("Failed to get task")
            .expect("task exists");

        assert_eq!(task.kind(), ModelKind::Task);
        assert_eq!(task.get_str("name").as_deref(), Some("Write docs"));
        assert_eq!(server.request_count("GET /task/abc1").await, 1);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;

        let result = clickup(&server, "pk_test").tasks().unwrap().find("nonexistent").await;

        assert!(matches!(
            result,
            Err(ClickUpError::ApiError {
                status_code: Some(404),
                ..
            })
        ));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token_rejects_other_tokens() {
        let state = Fixtures::default_scenario().with_required_token("pk_right");
        let server = MockServer::with_state(state).await;

        let rejected = clickup(&server, "pk_wrong").user().await;
        assert!(matches!(
            rejected,
            Err(ClickUpError::ApiError {
                status_code: Some(401),
                ..
            })
        ));

        let user = clickup(&server, "pk_right").user().await.unwrap().unwrap();
        assert_eq!(user.get_str("username").as_deref(), Some("John Doe"));

        server.shutdown().await;
    }
}
