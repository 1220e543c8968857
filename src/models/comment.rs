//! Comments on tasks, lists and conversation views.

use crate::error::Result;
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Comment",
    path: Some("/comment"),
    fields: &[
        Field::cast("date", DATETIME),
        Field::cast("id", Cast::Integer),
        Field::cast("resolved", Cast::Boolean),
        Field::one("assignee", ModelKind::Member),
        Field::one("assigned_by", ModelKind::Member),
        Field::one("user", ModelKind::Member),
    ],
    relations: &[
        RelationDef::new("list", list),
        RelationDef::new("task", task),
        RelationDef::new("view", view),
    ],
    ..Schema::BASE
};

fn list(comment: &Model) -> Result<Option<Relation>> {
    child_of_parent(comment, ModelKind::TaskList)
}

fn task(comment: &Model) -> Result<Option<Relation>> {
    child_of_parent(comment, ModelKind::Task)
}

fn view(comment: &Model) -> Result<Option<Relation>> {
    child_of_parent(comment, ModelKind::View)
}
