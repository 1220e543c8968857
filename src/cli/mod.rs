//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the clickapi binary.

use clap::{Parser, Subcommand};

use crate::support::ModelKind;

/// ClickUp API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "clickapi", about = "ClickUp API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by ID.
    Get {
        /// The resource type (task, list, space, ...).
        #[arg(value_parser = parse_kind)]
        entity: ModelKind,

        /// The ID of the resource.
        id: String,
    },

    /// List resources, at the top level or under a parent.
    List {
        /// The resource type to list.
        #[arg(value_parser = parse_kind)]
        entity: ModelKind,

        /// Type of the parent to list under.
        #[arg(long, value_parser = parse_kind, requires = "parent_id")]
        parent: Option<ModelKind>,

        /// ID of the parent to list under.
        #[arg(long, requires = "parent")]
        parent_id: Option<String>,

        /// Query filters as key=value.
        #[arg(long = "where", value_parser = parse_pair)]
        filters: Vec<(String, String)>,
    },

    /// Update fields of a resource.
    Update {
        /// The resource type.
        #[arg(value_parser = parse_kind)]
        entity: ModelKind,

        /// The ID of the resource to update.
        id: String,

        /// Field to change as key=value. Repeatable.
        #[arg(long = "set", value_parser = parse_pair, required = true)]
        fields: Vec<(String, String)>,
    },

    /// Delete a resource.
    Delete {
        /// The resource type.
        #[arg(value_parser = parse_kind)]
        entity: ModelKind,

        /// The ID of the resource to delete.
        id: String,
    },

    /// Show the user that owns the token.
    Whoami,
}

/// Resource types accept singular, plural and snake-case names.
pub fn parse_kind(s: &str) -> Result<ModelKind, String> {
    if let Some(kind) = ModelKind::root(s) {
        return Ok(kind);
    }
    if matches!(s, "list" | "lists") {
        return Ok(ModelKind::TaskList);
    }

    s.parse::<ModelKind>()
        .or_else(|e| s.strip_suffix('s').ok_or(e)?.parse())
        .map_err(|e| e.to_string())
}

/// Split `key=value`.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}
