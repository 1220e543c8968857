//! Checklists on a task.

use crate::error::Result;
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Checklist",
    path: Some("/checklist"),
    fields: &[
        Field::cast("date_created", DATETIME),
        Field::cast("id", Cast::String),
        Field::cast("orderindex", Cast::Float),
        Field::cast("resolved", Cast::Boolean),
        Field::cast("task_id", Cast::String),
        Field::cast("unresolved", Cast::Boolean),
        Field::many("items", ModelKind::Item),
    ],
    relations: &[RelationDef::new("task", task)],
    ..Schema::BASE
};

fn task(checklist: &Model) -> Result<Option<Relation>> {
    child_of_parent(checklist, ModelKind::Task)
}
