//! Teams, called workspaces in the ClickUp UI.

use crate::error::Result;
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Team",
    path: Some("/team"),
    fields: &[
        Field::cast("id", Cast::Integer),
        Field::many_unwrapped("members", ModelKind::Member),
    ],
    relations: &[
        RelationDef::new("goals", goals),
        RelationDef::new("shares", shares),
        RelationDef::new("spaces", spaces),
        RelationDef::new("tasks", tasks),
        RelationDef::new("task_templates", task_templates),
        RelationDef::new("views", views),
        RelationDef::new("webhooks", webhooks),
    ],
    ..Schema::BASE
};

fn goals(team: &Model) -> Result<Option<Relation>> {
    team.has_many(ModelKind::Goal).map(Some)
}

fn shares(team: &Model) -> Result<Option<Relation>> {
    team.has_many(ModelKind::Share).map(Some)
}

fn spaces(team: &Model) -> Result<Option<Relation>> {
    team.has_many(ModelKind::Space).map(Some)
}

/// Filtered tasks across the whole team.
fn tasks(team: &Model) -> Result<Option<Relation>> {
    team.has_many(ModelKind::Task).map(Some)
}

fn task_templates(team: &Model) -> Result<Option<Relation>> {
    team.has_many(ModelKind::TaskTemplate).map(Some)
}

fn views(team: &Model) -> Result<Option<Relation>> {
    team.has_many(ModelKind::View).map(Some)
}

fn webhooks(team: &Model) -> Result<Option<Relation>> {
    team.has_many(ModelKind::Webhook).map(Some)
}
