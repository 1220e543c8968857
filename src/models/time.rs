//! Tracked time of a task. The API wraps both shapes in `data`.

use crate::error::Result;
use crate::models::child_of_parent;
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Time",
    path: Some("/time"),
    response_key: Some("data"),
    fields: &[
        Field::cast("time", Cast::Integer),
        Field::many("intervals", ModelKind::Interval),
        Field::one("user", ModelKind::Member),
    ],
    relations: &[RelationDef::new("task", task)],
    ..Schema::BASE
};

fn task(time: &Model) -> Result<Option<Relation>> {
    child_of_parent(time, ModelKind::Task)
}
