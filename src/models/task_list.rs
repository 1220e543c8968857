//! Lists of tasks (`/list` in the API).

use crate::error::Result;
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "TaskList",
    path: Some("/list"),
    response_key: Some("list"),
    response_collection_key: Some("lists"),
    fields: &[
        Field::cast("archived", Cast::Boolean),
        Field::cast("due_date", DATETIME),
        Field::cast("due_date_time", Cast::Boolean),
        Field::cast("id", Cast::Integer),
        Field::cast("orderindex", Cast::Float),
        Field::cast("override_statuses", Cast::Boolean),
        Field::cast("start_date", DATETIME),
        Field::cast("start_date_time", Cast::Boolean),
        Field::cast("task_count", Cast::Integer),
        Field::one("assignee", ModelKind::Member),
        Field::one("priority", ModelKind::Priority),
        Field::one("status", ModelKind::Status),
        Field::many("statuses", ModelKind::Status),
    ],
    relations: &[
        RelationDef::new("comments", comments),
        RelationDef::new("fields", fields),
        RelationDef::new("folder", folder),
        RelationDef::new("members", members),
        RelationDef::new("space", space),
        RelationDef::new("tasks", tasks),
        RelationDef::new("task_templates", task_templates),
        RelationDef::new("views", views),
    ],
    ..Schema::BASE
};

fn comments(list: &Model) -> Result<Option<Relation>> {
    list.has_many(ModelKind::Comment).map(Some)
}

fn fields(list: &Model) -> Result<Option<Relation>> {
    list.has_many(ModelKind::Field).map(Some)
}

fn folder(list: &Model) -> Result<Option<Relation>> {
    child_of_parent(list, ModelKind::Folder)
}

fn members(list: &Model) -> Result<Option<Relation>> {
    list.has_many(ModelKind::Member).map(Some)
}

fn space(list: &Model) -> Result<Option<Relation>> {
    child_of_parent(list, ModelKind::Space)
}

fn tasks(list: &Model) -> Result<Option<Relation>> {
    list.has_many(ModelKind::Task).map(Some)
}

fn task_templates(list: &Model) -> Result<Option<Relation>> {
    list.has_many(ModelKind::TaskTemplate).map(Some)
}

fn views(list: &Model) -> Result<Option<Relation>> {
    list.has_many(ModelKind::View).map(Some)
}
