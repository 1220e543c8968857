//! Members of a team, list or task.

use crate::error::Result;
use crate::models::child_of_parent;
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Member",
    path: Some("/member"),
    fields: &[
        Field::cast("id", Cast::Integer),
        Field::cast("role", Cast::Integer),
    ],
    relations: &[
        RelationDef::new("list", list),
        RelationDef::new("task", task),
    ],
    ..Schema::BASE
};

fn list(member: &Model) -> Result<Option<Relation>> {
    child_of_parent(member, ModelKind::TaskList)
}

fn task(member: &Model) -> Result<Option<Relation>> {
    child_of_parent(member, ModelKind::Task)
}
