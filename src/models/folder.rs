//! Folders group lists inside a space.

use crate::error::Result;
use crate::models::child_of_parent;
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Folder",
    path: Some("/folder"),
    fields: &[
        Field::cast("archived", Cast::Boolean),
        Field::cast("hidden", Cast::Boolean),
        Field::cast("id", Cast::Integer),
        Field::cast("orderindex", Cast::Float),
        Field::cast("override_statuses", Cast::Boolean),
        Field::cast("task_count", Cast::Integer),
        Field::many("lists", ModelKind::TaskList),
        Field::many("statuses", ModelKind::Status),
    ],
    relations: &[
        RelationDef::new("space", space),
        RelationDef::new("views", views),
    ],
    ..Schema::BASE
};

fn space(folder: &Model) -> Result<Option<Relation>> {
    child_of_parent(folder, ModelKind::Space)
}

fn views(folder: &Model) -> Result<Option<Relation>> {
    folder.has_many(ModelKind::View).map(Some)
}
