//! Webhooks registered on a team.

use crate::error::Result;
use crate::models::child_of_parent;
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::{Field, ModelKind, RelationDef, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Webhook",
    path: Some("/webhook"),
    fields: &[
        Field::cast("folder_id", Cast::Integer),
        Field::cast("id", Cast::String),
        Field::cast("list_id", Cast::Integer),
        Field::cast("space_id", Cast::Integer),
        Field::cast("team_id", Cast::Integer),
        Field::cast("userid", Cast::Integer),
    ],
    relations: &[
        RelationDef::new("folder", folder),
        RelationDef::new("list", list),
        RelationDef::new("space", space),
        RelationDef::new("team", team),
        RelationDef::new("user", user),
    ],
    ..Schema::BASE
};

fn folder(webhook: &Model) -> Result<Option<Relation>> {
    webhook.belongs_to(ModelKind::Folder).map(Some)
}

fn list(webhook: &Model) -> Result<Option<Relation>> {
    webhook.belongs_to(ModelKind::TaskList).map(Some)
}

fn space(webhook: &Model) -> Result<Option<Relation>> {
    webhook.belongs_to(ModelKind::Space).map(Some)
}

fn team(webhook: &Model) -> Result<Option<Relation>> {
    child_of_parent(webhook, ModelKind::Team)
}

/// The member that created the hook, held in `userid`.
fn user(webhook: &Model) -> Result<Option<Relation>> {
    webhook.belongs_to_with_key(ModelKind::Member, "userid").map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_belongs_to_paths() {
        let webhook = Model::new(ModelKind::Webhook).new_from_builder(
            json!({
                "id": "4b67ac88",
                "userid": 183,
                "team_id": 108,
                "folder_id": null,
                "list_id": 1,
                "space_id": 2
            })
            .as_object()
            .cloned()
            .unwrap(),
        );

        let path = |name: &str| {
            webhook
                .relation(name)
                .unwrap()
                .unwrap()
                .builder()
                .path(None)
                .unwrap()
        };

        assert_eq!(path("list"), "/list/1");
        assert_eq!(path("space"), "/space/2");
        assert_eq!(path("user"), "/member/183");
        assert_eq!(path("folder"), "/folder");

        let user = webhook.relation("user").unwrap().unwrap();
        assert_eq!(user.foreign_key_name(), Some("userid"));
        assert_eq!(user.foreign_key().as_i64(), Some(183));
    }
}
