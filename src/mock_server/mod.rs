//! Mock ClickUp API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the ClickUp
//! API for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing (teams, spaces, lists, tasks and
//! comments). Every request is recorded so tests can count round trips.
//!
//! # Example
//!
//! ```ignore
//! use clickapi::mock_server::MockServer;
//! use clickapi::{Builder, ClickUpClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ClickUpClient::new(server.url()).unwrap().with_token("pk_test");
//!     let clickup = Builder::new().set_client(client);
//!
//!     // Server comes with default fixtures
//!     let teams = clickup.teams().unwrap().get().await.unwrap();
//!     assert_eq!(teams[0].get_str("name").as_deref(), Some("Test Team"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::{MockState, Record, Table};
