use async_trait::async_trait;
use serde_json::Value as Json;

use super::{Related, Resolve};
use crate::error::Result;
use crate::support::attributes::{self, Value};
use crate::support::builder::Builder;
use crate::support::model::Model;

/// The record whose id the child holds in a foreign key attribute.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    builder: Builder,
    child: Model,
    foreign_key: String,
}

impl BelongsTo {
    /// Scope `builder` to the id found in the child's foreign key.
    #[must_use]
    pub fn new(builder: Builder, child: Model, foreign_key: impl Into<String>) -> Self {
        let foreign_key = foreign_key.into();
        let id = child
            .attributes()
            .get(&foreign_key)
            .cloned()
            .unwrap_or(Json::Null);

        Self {
            builder: builder.where_id(id),
            child,
            foreign_key,
        }
    }

    /// The model that declared the relation.
    #[must_use]
    pub fn child(&self) -> &Model {
        &self.child
    }

    #[must_use]
    pub fn foreign_key_name(&self) -> &str {
        &self.foreign_key
    }

    #[must_use]
    pub fn foreign_key(&self) -> Value {
        self.child.attribute(&self.foreign_key)
    }

    /// Whether the child holds a usable id.
    pub(crate) fn has_foreign_key(&self) -> bool {
        self.child
            .attributes()
            .get(&self.foreign_key)
            .and_then(attributes::key_segment)
            .is_some()
    }
}

#[async_trait]
impl Resolve for BelongsTo {
    fn builder(&self) -> &Builder {
        &self.builder
    }

    fn builder_mut(&mut self) -> &mut Builder {
        &mut self.builder
    }

    fn parent(&self) -> &Model {
        &self.child
    }

    async fn resolve(&self) -> Result<Related> {
        if !self.has_foreign_key() {
            tracing::debug!(
                model = %self.child.kind(),
                foreign_key = %self.foreign_key,
                "no foreign key, skipping request"
            );
            return Ok(Related::None);
        }

        Ok(self.builder.first().await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::schema::ModelKind;
    use serde_json::json;

    fn comment(attributes: Json) -> Model {
        Model::new(ModelKind::Comment).new_from_builder(attributes.as_object().cloned().unwrap())
    }

    #[test]
    fn test_scopes_builder_to_foreign_key() {
        let child = comment(json!({"id": 1, "list_id": 100}));
        let relation = BelongsTo::new(
            Builder::new().set_kind(ModelKind::TaskList),
            child,
            "list_id",
        );

        assert_eq!(relation.builder().path(None).unwrap(), "/list/100");
        assert_eq!(relation.foreign_key(), Value::Integer(100));
        assert!(relation.has_foreign_key());
    }

    #[tokio::test]
    async fn test_missing_foreign_key_resolves_to_nothing() {
        // No client anywhere: a request would fail with NoClient
        let relation = BelongsTo::new(
            Builder::new().set_kind(ModelKind::TaskList),
            comment(json!({"id": 1})),
            "list_id",
        );

        assert_eq!(relation.builder().path(None).unwrap(), "/list");
        assert_eq!(relation.resolve().await.unwrap(), Related::None);
    }

    #[tokio::test]
    async fn test_blank_foreign_key_resolves_to_nothing() {
        let relation = BelongsTo::new(
            Builder::new().set_kind(ModelKind::TaskList),
            comment(json!({"id": 1, "list_id": ""})),
            "list_id",
        );

        assert_eq!(relation.resolve().await.unwrap(), Related::None);
    }
}
