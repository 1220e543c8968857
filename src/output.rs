//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::Value as Json;
use tabled::Tabled;

use crate::support::{Collection, Model};

/// Attributes tried, in order, for a display name.
const NAME_FIELDS: &[&str] = &["name", "username", "title", "email"];

/// Trait for human-readable key-value output.
///
/// Implemented by models to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Model {
    fn pretty_print(&self) -> String {
        let header = format!("{}: {}", self.kind(), key_of(self));
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        for (key, value) in self.attributes() {
            let label = format!("{key}:");
            lines.push(format!("{label:<16}{}", summarize(value)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Collection {
    fn pretty_print(&self) -> String {
        self.iter()
            .map(PrettyPrint::pretty_print)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// One line of a listing.
#[derive(Debug, Tabled)]
pub struct ModelRow {
    pub id: String,
    pub name: String,
}

impl From<&Model> for ModelRow {
    fn from(model: &Model) -> Self {
        Self {
            id: key_of(model),
            name: NAME_FIELDS
                .iter()
                .find_map(|field| model.attributes().get(*field).and_then(Json::as_str))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

fn key_of(model: &Model) -> String {
    model
        .attributes()
        .get(model.key_name())
        .map(summarize)
        .unwrap_or_default()
}

/// Scalars as is, containers as a size.
fn summarize(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) => s.clone(),
        Json::Array(items) => format!("[{} items]", items.len()),
        Json::Object(map) => format!("{{{} fields}}", map.len()),
        other => other.to_string(),
    }
}
