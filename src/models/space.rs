//! Spaces of a team.

use crate::error::Result;
use crate::models::child_of_parent;
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Space",
    path: Some("/space"),
    fields: &[
        Field::cast("archived", Cast::Boolean),
        Field::cast("id", Cast::Integer),
        Field::cast("multiple_assignees", Cast::Boolean),
        Field::cast("private", Cast::Boolean),
        Field::many_unwrapped("members", ModelKind::Member),
        Field::many("statuses", ModelKind::Status),
    ],
    relations: &[
        RelationDef::new("folders", folders),
        RelationDef::new("lists", lists),
        RelationDef::new("tags", tags),
        RelationDef::new("team", team),
        RelationDef::new("views", views),
    ],
    ..Schema::BASE
};

fn folders(space: &Model) -> Result<Option<Relation>> {
    space.has_many(ModelKind::Folder).map(Some)
}

/// Folderless lists.
fn lists(space: &Model) -> Result<Option<Relation>> {
    space.has_many(ModelKind::TaskList).map(Some)
}

fn tags(space: &Model) -> Result<Option<Relation>> {
    space.has_many(ModelKind::Tag).map(Some)
}

fn team(space: &Model) -> Result<Option<Relation>> {
    child_of_parent(space, ModelKind::Team)
}

fn views(space: &Model) -> Result<Option<Relation>> {
    space.has_many(ModelKind::View).map(Some)
}
