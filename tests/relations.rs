//! Relation resolution tests.
//!
//! Relations are resolved lazily with a single request, then cached on the
//! model that loaded them.

use clickapi::{ClickUpClient, ClickUpError, Model, ModelKind, Related, Relation};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ClickUpClient {
    ClickUpClient::new(&server.uri()).unwrap().with_token("pk_test")
}

fn hydrate(kind: ModelKind, attributes: serde_json::Value) -> Model {
    Model::new(kind).new_from_builder(attributes.as_object().cloned().unwrap())
}

// =============================================================================
// HasMany
// =============================================================================

#[tokio::test]
async fn test_has_many_requests_once_and_caches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/task/abc1/comment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [
                {"id": "1", "comment": [{"text": "First!"}], "comment_text": "First!"},
                {"id": "2", "comment": [{"text": "Second"}], "comment_text": "Second"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut task = hydrate(ModelKind::Task, json!({"id": "abc1"})).with_client(client(&server));
    assert!(!task.relation_loaded("comments"));

    let comments = task.get_attribute("comments").await.unwrap();
    let comments = comments.as_collection().expect("comments are a collection");

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].kind(), ModelKind::Comment);
    assert_eq!(comments[0].get_i64("id"), Some(1));
    assert_eq!(comments[1].get_str("comment_text").as_deref(), Some("Second"));
    assert_eq!(comments[0].parent_kind(), Some(ModelKind::Task));

    // Second read comes from the cache
    assert!(task.relation_loaded("comments"));
    let again = task.get_attribute("comments").await.unwrap();
    assert_eq!(again.as_collection().unwrap().len(), 2);

    // Loaded relations are serialized with the model
    assert_eq!(task.to_json()["comments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_tap_adds_filters_to_relation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list/100/task"))
        .and(query_param("archived", "1"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tasks": []})))
        .expect(1)
        .mount(&server)
        .await;

    let list = hydrate(ModelKind::TaskList, json!({"id": "100"})).with_client(client(&server));

    let relation = list
        .relation("tasks")
        .unwrap()
        .unwrap()
        .where_true("archived")
        .tap(|builder| builder.where_("page", 3));

    let related = relation.resolve().await.unwrap();
    assert!(related.as_collection().unwrap().is_empty());
}

#[tokio::test]
async fn test_undeclared_relation() {
    let mut task = hydrate(ModelKind::Task, json!({"id": "abc1"}));

    assert!(task.get_attribute("gadgets").await.unwrap().is_null());

    let err = task.relation("gadgets").unwrap_err();
    assert_eq!(err.to_string(), "Call to undefined method [Task::gadgets]");
}

#[tokio::test]
async fn test_view_comments_need_conversation_view() {
    let mut board = hydrate(ModelKind::View, json!({"id": "3c-105", "type": "board"}));

    let err = board.get_attribute("comments").await.unwrap_err();
    assert!(matches!(err, ClickUpError::InvalidRelationship(_)));

    let chat = hydrate(ModelKind::View, json!({"id": "3c-106", "type": "conversation"}));
    let relation = chat.relation("comments").unwrap().unwrap();
    assert_eq!(relation.builder().path(None).unwrap(), "/view/3c-106/comment");
}

// =============================================================================
// BelongsTo
// =============================================================================

#[tokio::test]
async fn test_belongs_to_without_foreign_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut task = hydrate(ModelKind::Task, json!({"id": "abc1", "view_id": ""}))
        .with_client(client(&server));

    let view = task.load("view").await.unwrap();
    assert!(view.is_none());
    assert!(task.relation_loaded("view"));
}

#[tokio::test]
async fn test_belongs_to_fetches_by_foreign_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/view/3c-105"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "view": {"id": "3c-105", "name": "Board", "type": "board"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut task = hydrate(ModelKind::Task, json!({"id": "abc1", "view_id": "3c-105"}))
        .with_client(client(&server));

    let relation = task.relation("view").unwrap().unwrap();
    assert!(matches!(relation, Relation::BelongsTo(_)));
    assert_eq!(relation.foreign_key_name(), Some("view_id"));
    assert_eq!(relation.foreign_key().as_str(), Some("3c-105"));

    let view = task.get_attribute("view").await.unwrap();
    let view = view.as_model().expect("view is a model");
    assert_eq!(view.get_str("name").as_deref(), Some("Board"));
    assert!(view.parent().is_none());
}

// =============================================================================
// ChildOf
// =============================================================================

#[tokio::test]
async fn test_child_of_returns_parent_without_io() {
    // No client anywhere: any request would fail
    let task = hydrate(ModelKind::Task, json!({"id": "abc1", "name": "Write docs"}));
    let mut comment = hydrate(ModelKind::Comment, json!({"id": "1"})).with_parent(task);

    let relation = comment.relation("task").unwrap().unwrap();
    assert!(matches!(relation, Relation::ChildOf(_)));

    match comment.load("task").await.unwrap() {
        Related::One(task) => {
            assert_eq!(task.kind(), ModelKind::Task);
            assert_eq!(task.get_str("name").as_deref(), Some("Write docs"));
        }
        other => panic!("Expected the parent task, got {other:?}"),
    }

    // Loaded through a task, a comment has no list
    assert!(comment.relation("list").unwrap().is_none());
    assert!(comment.get_attribute("list").await.unwrap().is_null());
}

#[tokio::test]
async fn test_child_of_requires_parent_of_declared_type() {
    let cases = [
        (ModelKind::Checklist, "task", ModelKind::Task),
        (ModelKind::Field, "list", ModelKind::TaskList),
        (ModelKind::Folder, "space", ModelKind::Space),
        (ModelKind::Goal, "team", ModelKind::Team),
        (ModelKind::KeyResult, "goal", ModelKind::Goal),
        (ModelKind::Share, "team", ModelKind::Team),
        (ModelKind::Space, "team", ModelKind::Team),
        (ModelKind::Tag, "space", ModelKind::Space),
        (ModelKind::Time, "task", ModelKind::Task),
        (ModelKind::Webhook, "team", ModelKind::Team),
    ];

    for (kind, name, parent_kind) in cases {
        let wrong_kind = if parent_kind == ModelKind::TaskList {
            ModelKind::Folder
        } else {
            ModelKind::TaskList
        };

        let wrong_parent = hydrate(wrong_kind, json!({"id": 100}));
        let mut child = hydrate(kind, json!({"id": 1})).with_parent(wrong_parent);
        assert!(
            child.relation(name).unwrap().is_none(),
            "{kind}::{name} under a {wrong_kind}"
        );
        assert!(child.get_attribute(name).await.unwrap().is_null());

        let parent = hydrate(parent_kind, json!({"id": 100}));
        let mut child = hydrate(kind, json!({"id": 1})).with_parent(parent);
        let related = child.load(name).await.unwrap();
        assert_eq!(
            related.as_model().map(Model::kind),
            Some(parent_kind),
            "{kind}::{name} under a {parent_kind}"
        );
    }
}

#[tokio::test]
async fn test_embedded_folder_does_not_take_list_as_space() {
    let list = hydrate(ModelKind::TaskList, json!({"id": 100}));
    let task = hydrate(
        ModelKind::Task,
        json!({"id": "abc1", "folder": {"id": "457", "name": "Hidden"}}),
    )
    .with_parent(list);

    let folder = task.attribute("folder");
    let mut folder = folder.as_model().expect("folder is a model").clone();
    assert_eq!(folder.parent_kind(), Some(ModelKind::TaskList));

    assert!(folder.relation("space").unwrap().is_none());
    assert!(folder.get_attribute("space").await.unwrap().is_null());
}
