//! Goals of a team.

use crate::error::Result;
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Goal",
    path: Some("/goal"),
    fields: &[
        Field::cast("archived", Cast::Boolean),
        Field::cast("creator", Cast::Integer),
        Field::cast("date_created", DATETIME),
        Field::cast("due_date", DATETIME),
        Field::cast("folder_id", Cast::Integer),
        Field::cast("id", Cast::String),
        Field::cast("key_result_count", Cast::Integer),
        Field::cast("last_update", DATETIME),
        Field::cast("multiple_owners", Cast::Boolean),
        Field::cast("owner", Cast::Integer),
        Field::cast("percent_completed", Cast::Float),
        Field::cast("pinned", Cast::Boolean),
        Field::cast("pretty_id", Cast::Integer),
        Field::cast("private", Cast::Boolean),
        Field::cast("start_date", DATETIME),
        Field::cast("team_id", Cast::Integer),
        Field::many("owners", ModelKind::Member),
        Field::many_unwrapped("members", ModelKind::Member),
        Field::many("key_results", ModelKind::KeyResult),
    ],
    relations: &[
        RelationDef::new("folder", folder),
        RelationDef::new("team", team),
    ],
    ..Schema::BASE
};

fn folder(goal: &Model) -> Result<Option<Relation>> {
    goal.belongs_to(ModelKind::Folder).map(Some)
}

fn team(goal: &Model) -> Result<Option<Relation>> {
    child_of_parent(goal, ModelKind::Team)
}
