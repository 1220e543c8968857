//! ClickUp API client library.
//!
//! A Rust library for the ClickUp v2 REST API built around models that know
//! where they live. Every resource type declares a static schema (path,
//! casts, nested objects, relations); a [`Builder`] turns that schema, a
//! parent chain and some filters into one request, and hands the response
//! back as [`Model`]s that can be read, changed and saved.
//!
//! # Quick Start
//!
//! ```no_run
//! use clickapi::{Builder, ClickUpClient, ModelKind};
//!
//! #[tokio::main]
//! async fn main() -> clickapi::Result<()> {
//!     // Create client from environment variables
//!     let client = ClickUpClient::from_env()?;
//!     let clickup = Builder::new().set_client(client);
//!
//!     // Every team the token can see
//!     let teams = clickup.teams()?.get().await?;
//!     println!("Found {} teams", teams.len());
//!
//!     // Walk down to the tasks of a list, then load a relation
//!     let list = clickup
//!         .new_instance_for(ModelKind::TaskList)
//!         .find(123)
//!         .await?;
//!
//!     if let Some(mut list) = list {
//!         let tasks = list.get_attribute("tasks").await?;
//!         for task in tasks.as_collection().into_iter().flatten() {
//!             println!("{}", task.get_str("name").unwrap_or_default());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Model`] holds raw attributes, casts them on read and tracks what
//!   changed for partial updates.
//! - [`Builder`] scopes a query to a type, a parent and filters.
//! - [`Relation`] (`HasMany`, `BelongsTo`, `ChildOf`) links models and is
//!   resolved lazily, at most once per model instance.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CLICKUP_API_TOKEN` (required) - Your ClickUp API token
//! - `CLICKUP_URL` (optional) - Base URL (defaults to `https://api.clickup.com/api/v2`)

mod client;
mod credentials;
mod error;

pub mod cli;
pub mod models;
pub mod output;
pub mod support;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::ClickUpClient;
pub use credentials::{CredentialStore, Encrypter, TokenOwner};
pub use error::{ClickUpError, Result};

// Re-export the model layer
pub use support::{
    BelongsTo, Builder, Cast, ChildOf, Collection, HasMany, Model, ModelKind, Precision, Related,
    Relation, Resolve, Schema, Value,
};
