//! Task tags, defined per space.

use crate::error::Result;
use crate::models::child_of_parent;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Tag",
    path: Some("/tag"),
    nested: true,
    relations: &[RelationDef::new("space", space)],
    ..Schema::BASE
};

fn space(tag: &Model) -> Result<Option<Relation>> {
    child_of_parent(tag, ModelKind::Space)
}
