//! Resources shared with a team.

use crate::error::Result;
use crate::models::child_of_parent;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Share",
    path: Some("/share"),
    fields: &[
        Field::many("folders", ModelKind::Folder),
        Field::many("lists", ModelKind::TaskList),
        Field::many("tasks", ModelKind::Task),
    ],
    relations: &[RelationDef::new("team", team)],
    ..Schema::BASE
};

fn team(share: &Model) -> Result<Option<Relation>> {
    child_of_parent(share, ModelKind::Team)
}
