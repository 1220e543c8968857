//! Custom fields of a list.

use crate::error::Result;
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Field",
    path: Some("/field"),
    nested: true,
    fields: &[
        Field::cast("date_created", DATETIME),
        Field::cast("hide_from_guest", Cast::Boolean),
        Field::cast("id", Cast::String),
    ],
    relations: &[RelationDef::new("list", list)],
    ..Schema::BASE
};

fn list(field: &Model) -> Result<Option<Relation>> {
    child_of_parent(field, ModelKind::TaskList)
}
