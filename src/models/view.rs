//! Views of a team, space, folder or list.
//!
//! What a view relates to depends on its `type`: only conversation views
//! carry comments, and only task views (list, board, ...) carry tasks.

use crate::error::{ClickUpError, Result};
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

/// View types that hold no tasks.
const TASKLESS_TYPES: &[&str] = &["conversation", "doc", "embed"];

pub static SCHEMA: Schema = Schema {
    name: "View",
    path: Some("/view"),
    fields: &[
        Field::cast("date_created", DATETIME),
        Field::cast("date_protected", Cast::Integer),
        Field::cast("id", Cast::String),
        Field::cast("orderindex", Cast::Float),
        Field::cast("protected", Cast::Boolean),
        Field::one("protected_by", ModelKind::Member),
    ],
    relations: &[
        RelationDef::new("comments", comments),
        RelationDef::new("folder", folder),
        RelationDef::new("list", list),
        RelationDef::new("space", space),
        RelationDef::new("tasks", tasks),
        RelationDef::new("team", team),
    ],
    ..Schema::BASE
};

fn view_type(view: &Model) -> String {
    view.get_str("type").unwrap_or_default()
}

fn comments(view: &Model) -> Result<Option<Relation>> {
    let kind = view_type(view);
    if kind != "conversation" {
        return Err(ClickUpError::InvalidRelationship(format!(
            "The view is of type [{kind}], but must be of type [conversation] to have comments."
        )));
    }

    view.has_many(ModelKind::Comment).map(Some)
}

fn folder(view: &Model) -> Result<Option<Relation>> {
    child_of_parent(view, ModelKind::Folder)
}

fn list(view: &Model) -> Result<Option<Relation>> {
    child_of_parent(view, ModelKind::TaskList)
}

fn space(view: &Model) -> Result<Option<Relation>> {
    child_of_parent(view, ModelKind::Space)
}

fn tasks(view: &Model) -> Result<Option<Relation>> {
    let kind = view_type(view);
    if TASKLESS_TYPES.contains(&kind.as_str()) {
        return Err(ClickUpError::InvalidRelationship(format!(
            "The view is of type [{kind}], but must be one of the task types to have tasks."
        )));
    }

    view.has_many(ModelKind::Task).map(Some)
}

fn team(view: &Model) -> Result<Option<Relation>> {
    child_of_parent(view, ModelKind::Team)
}

// =============================================================================
// TESTS
// =============================================================================
