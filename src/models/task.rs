//! Tasks, the central ClickUp resource.

use crate::error::Result;
use crate::models::{child_of_parent, DATETIME};
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Task",
    path: Some("/task"),
    fields: &[
        Field::cast("archived", Cast::Boolean),
        Field::cast("date_closed", DATETIME),
        Field::cast("date_created", DATETIME),
        Field::cast("date_updated", DATETIME),
        Field::cast("due_date", DATETIME),
        Field::cast("id", Cast::String),
        Field::cast("orderindex", Cast::Float),
        Field::cast("start_date", DATETIME),
        Field::cast("team_id", Cast::Integer),
        Field::cast("time_estimate", Cast::Integer),
        Field::cast("time_spent", Cast::Integer),
        Field::many("assignees", ModelKind::Member),
        Field::many("checklists", ModelKind::Checklist),
        Field::one("creator", ModelKind::Member),
        Field::many("custom_fields", ModelKind::Field),
        Field::one("folder", ModelKind::Folder),
        Field::one("priority", ModelKind::Priority),
        // Undocumented, left over from the first API version
        Field::one("project", ModelKind::Project),
        Field::one("space", ModelKind::Space),
        Field::one("status", ModelKind::Status),
        Field::many("tags", ModelKind::Tag),
    ],
    relations: &[
        RelationDef::new("comments", comments),
        RelationDef::new("list", list),
        RelationDef::new("members", members),
        RelationDef::new("team", team),
        RelationDef::new("times", times),
        RelationDef::new("view", view),
    ],
    ..Schema::BASE
};

fn comments(task: &Model) -> Result<Option<Relation>> {
    task.has_many(ModelKind::Comment).map(Some)
}

fn list(task: &Model) -> Result<Option<Relation>> {
    child_of_parent(task, ModelKind::TaskList)
}

fn members(task: &Model) -> Result<Option<Relation>> {
    task.has_many(ModelKind::Member).map(Some)
}

fn team(task: &Model) -> Result<Option<Relation>> {
    child_of_parent(task, ModelKind::Team)
}

fn times(task: &Model) -> Result<Option<Relation>> {
    task.has_many(ModelKind::Time).map(Some)
}

fn view(task: &Model) -> Result<Option<Relation>> {
    task.belongs_to(ModelKind::View).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(attributes: serde_json::Value) -> Model {
        Model::new(ModelKind::Task).new_from_builder(attributes.as_object().cloned().unwrap())
    }

    #[test]
    fn test_checklists_carry_items() {
        let task = task(json!({
            "id": "9hx",
            "checklists": [{
                "id": "b955c4dc",
                "name": "Checklist",
                "items": [{"id": "21e08dc8", "date_created": "1567780450"}]
            }]
        }));

        let checklists = task.attribute("checklists");
        let checklist = &checklists.as_collection().unwrap()[0];
        assert_eq!(checklist.kind(), ModelKind::Checklist);

        let items = checklist.attribute("items");
        let item = &items.as_collection().unwrap()[0];
        assert_eq!(item.kind(), ModelKind::Item);
        assert_eq!(item.get_datetime("date_created").unwrap().timestamp(), 1_567_780_450);
    }

    #[test]
    fn test_list_relation_requires_list_parent() {
        let orphan = task(json!({"id": "9hx"}));
        assert!(orphan.relation("list").unwrap().is_none());
        assert!(orphan.relation("team").unwrap().is_none());

        let team = Model::new(ModelKind::Team)
            .new_from_builder(json!({"id": 1}).as_object().cloned().unwrap());
        let under_team = task(json!({"id": "9hx"})).with_parent(team);
        assert!(under_team.relation("team").unwrap().is_some());
        assert!(under_team.relation("list").unwrap().is_none());
    }

    #[test]
    fn test_has_many_paths() {
        let task = task(json!({"id": "9hx"}));
        let path = |name: &str| {
            task.relation(name)
                .unwrap()
                .unwrap()
                .builder()
                .path(None)
                .unwrap()
        };

        assert_eq!(path("comments"), "/task/9hx/comment");
        assert_eq!(path("members"), "/task/9hx/member");
        assert_eq!(path("times"), "/task/9hx/time");
    }
}
