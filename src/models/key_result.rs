//! Key results (targets) of a goal.

use crate::error::Result;
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "KeyResult",
    path: Some("/key_result"),
    response_key: Some("key_result"),
    response_collection_key: Some("key_results"),
    nested: true,
    fields: &[
        Field::cast("completed", Cast::Boolean),
        Field::cast("creator", Cast::Integer),
        Field::cast("date_created", DATETIME),
        Field::cast("goal_pretty_id", Cast::Integer),
        Field::cast("id", Cast::String),
        Field::cast("percent_completed", Cast::Float),
        Field::many("owners", ModelKind::Member),
    ],
    relations: &[RelationDef::new("goal", goal)],
    ..Schema::BASE
};

fn goal(key_result: &Model) -> Result<Option<Relation>> {
    child_of_parent(key_result, ModelKind::Goal)
}
