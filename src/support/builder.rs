//! Query builder for ClickUp resources.
//!
//! A [`Builder`] is scoped to one model type, optionally under a parent
//! model, and carries the filters that become the query string. Each read
//! issues exactly one GET.

use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::client::ClickUpClient;
use crate::error::{ClickUpError, Result};
use crate::support::attributes::Value;
use crate::support::collection::Collection;
use crate::support::model::Model;
use crate::support::query::{self, Filters};
use crate::support::schema::{ModelKind, Schema};

#[derive(Debug, Clone, Default)]
pub struct Builder {
    kind: Option<ModelKind>,
    client: Option<ClickUpClient>,
    parent: Option<Arc<Model>>,
    wheres: Filters,
    model: Option<Model>,
}

impl Builder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Root builder for everything reachable with `client`.
    #[must_use]
    pub fn for_client(client: ClickUpClient) -> Self {
        debug_assert!(ModelKind::validate_registry().is_ok());
        Self::new().set_client(client)
    }

    /// Scope the builder to a model type.
    #[must_use]
    pub fn set_kind(mut self, kind: ModelKind) -> Self {
        self.kind = Some(kind);
        self.rebuild();
        self
    }

    /// Scope the builder to a model type by name.
    ///
    /// # Errors
    ///
    /// [`ClickUpError::UnknownModel`] if no type answers to `name`.
    pub fn set_class(self, name: &str) -> Result<Self> {
        Ok(self.set_kind(name.parse()?))
    }

    #[must_use]
    pub fn set_client(mut self, client: impl Into<Option<ClickUpClient>>) -> Self {
        self.client = client.into();
        if let Some(model) = &mut self.model {
            model.set_client(self.client.clone());
        }
        self
    }

    #[must_use]
    pub fn set_parent(mut self, parent: impl Into<Option<Arc<Model>>>) -> Self {
        self.parent = parent.into();
        self.rebuild();
        self
    }

    /// Rebuild the template model, carrying over any key already set.
    fn rebuild(&mut self) {
        let Some(kind) = self.kind else {
            self.model = None;
            return;
        };

        let mut model = Model::new(kind);
        model.set_parent(self.parent.clone());
        model.set_client(self.client.clone());

        let key_name = model.key_name();
        let key = match self.model.take() {
            Some(previous) => previous.attributes().get(key_name).cloned(),
            None => None,
        };
        let key = key.or_else(|| {
            let position = self.wheres.iter().position(|(name, _)| name == key_name)?;
            Some(self.wheres.remove(position).1)
        });

        if let Some(key) = key {
            model.set_raw(key_name, key);
        }

        self.model = Some(model);
    }

    /// Add a filter. Filtering on the primary key addresses a single
    /// resource instead.
    #[must_use]
    pub fn where_(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into().into_json();

        if let Some(model) = &mut self.model {
            if name == model.key_name() {
                model.set_raw(name, value);
                return self;
            }
        }

        query::set_filter(&mut self.wheres, name, value);
        self
    }

    #[must_use]
    pub fn where_true(self, name: impl Into<String>) -> Self {
        self.where_(name, true)
    }

    #[must_use]
    pub fn where_not(self, name: impl Into<String>) -> Self {
        self.where_(name, false)
    }

    #[must_use]
    pub fn where_id(self, id: impl Into<Value>) -> Self {
        let key_name = self
            .kind
            .map_or("id", |kind| kind.schema().primary_key);
        self.where_(key_name, id)
    }

    #[must_use]
    pub fn kind(&self) -> Option<ModelKind> {
        self.kind
    }

    #[must_use]
    pub fn client(&self) -> Option<&ClickUpClient> {
        self.client.as_ref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Model> {
        self.parent.as_deref()
    }

    #[must_use]
    pub fn wheres(&self) -> &[(String, Json)] {
        &self.wheres
    }

    /// The template model the builder queries for.
    ///
    /// # Errors
    ///
    /// [`ClickUpError::NoRelationTarget`] if no type has been set.
    pub fn model(&self) -> Result<&Model> {
        self.model.as_ref().ok_or(ClickUpError::NoRelationTarget)
    }

    /// Request path, filters included.
    pub fn path(&self, extra: Option<&str>) -> Result<String> {
        Ok(self.model()?.path(extra, &self.wheres))
    }

    /// Fetch every matching resource.
    pub async fn get(&self) -> Result<Collection> {
        self.get_with(&[]).await
    }

    /// Fetch every matching resource, keeping only `fields` of each.
    ///
    /// An empty `fields` keeps everything.
    #[tracing::instrument(skip(self), fields(model = ?self.kind))]
    pub async fn get_with(&self, fields: &[&str]) -> Result<Collection> {
        let model = self.model()?;
        let client = model.client()?;

        let path = self.path(None)?;
        tracing::debug!(%path, "resolved request path");

        let response = client.get(&path).await?;

        let rows = match peel(model.schema(), response) {
            Json::Array(items) => items,
            Json::Null => Vec::new(),
            object @ Json::Object(_) => vec![object],
            other => {
                tracing::warn!(response = %other, "unexpected scalar response");
                Vec::new()
            }
        };

        let collection: Collection = rows
            .into_iter()
            .filter_map(|row| match row {
                Json::Object(attributes) => Some(project(attributes, fields)),
                _ => None,
            })
            .map(|attributes| {
                model
                    .new_from_builder(attributes)
                    .with_client(client.clone())
            })
            .collect();

        tracing::debug!(count = collection.len(), "hydrated models");
        Ok(collection)
    }

    /// The first matching resource.
    pub async fn first(&self) -> Result<Option<Model>> {
        Ok(self.get().await?.into_first())
    }

    /// Fetch one resource by id.
    pub async fn find(&self, id: impl Into<Value>) -> Result<Option<Model>> {
        self.find_with(id, &[]).await
    }

    pub async fn find_with(&self, id: impl Into<Value>, fields: &[&str]) -> Result<Option<Model>> {
        Ok(self
            .clone()
            .where_id(id)
            .get_with(fields)
            .await?
            .into_first())
    }

    /// A transient model of the builder's type, not yet saved.
    pub fn make<I, K, V>(&self, attributes: I) -> Result<Model>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.model()?.new_instance(attributes, false)
    }

    /// Make a model and save it.
    ///
    /// A save that could not reach the API leaves the model transient; only
    /// configuration problems are returned as errors.
    pub async fn create<I, K, V>(&self, attributes: I) -> Result<Model>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut model = self.make(attributes)?;
        if !model.save().await? {
            tracing::warn!(model = %model.kind(), "create did not reach the API");
        }
        Ok(model)
    }

    /// A fresh builder with the same type, client and parent, but no filters.
    #[must_use]
    pub fn new_instance(&self) -> Self {
        let builder = Self::new()
            .set_client(self.client.clone())
            .set_parent(self.parent.clone());

        match self.kind {
            Some(kind) => builder.set_kind(kind),
            None => builder,
        }
    }

    /// A fresh builder for another type, with the same client and parent.
    #[must_use]
    pub fn new_instance_for(&self, kind: ModelKind) -> Self {
        self.new_instance().set_kind(kind)
    }

    /// Builder for a top-level resource such as `"spaces"` or `"teams"`.
    ///
    /// # Errors
    ///
    /// [`ClickUpError::UnsupportedOperation`] for unknown names, and for
    /// every name once the builder is scoped under a parent.
    pub fn root(&self, name: &str) -> Result<Self> {
        match ModelKind::root(name) {
            Some(kind) if self.parent.is_none() => Ok(self.new_instance_for(kind)),
            _ => Err(ClickUpError::UnsupportedOperation(name.to_string())),
        }
    }

    pub fn spaces(&self) -> Result<Self> {
        self.root("spaces")
    }

    pub fn tasks(&self) -> Result<Self> {
        self.root("tasks")
    }

    pub fn teams(&self) -> Result<Self> {
        self.root("teams")
    }

    /// Workspaces are teams under their newer name.
    pub fn workspaces(&self) -> Result<Self> {
        self.root("workspaces")
    }

    pub async fn get_spaces(&self) -> Result<Collection> {
        self.spaces()?.get().await
    }

    pub async fn get_tasks(&self) -> Result<Collection> {
        self.tasks()?.get().await
    }

    /// Every team visible to the token, fetched right away.
    pub async fn get_teams(&self) -> Result<Collection> {
        self.teams()?.get().await
    }

    pub async fn get_workspaces(&self) -> Result<Collection> {
        self.workspaces()?.get().await
    }

    /// The user owning the token.
    pub async fn user(&self) -> Result<Option<Model>> {
        self.new_instance_for(ModelKind::User).first().await
    }
}

/// Unwrap a response envelope such as `{"task": {...}}` or
/// `{"tasks": [...]}`.
pub(crate) fn peel(schema: &Schema, payload: Json) -> Json {
    let Json::Object(mut map) = payload else {
        return payload;
    };

    let single = schema.response_key();
    if map.get(&single).is_some_and(Json::is_object) {
        return map.remove(&single).unwrap_or_default();
    }

    let plural = schema.response_collection_key();
    if map.get(&plural).is_some_and(Json::is_array) {
        return map.remove(&plural).unwrap_or_default();
    }

    Json::Object(map)
}

fn project(attributes: Map<String, Json>, fields: &[&str]) -> Map<String, Json> {
    if fields.is_empty() || fields == ["*"] {
        return attributes;
    }

    attributes
        .into_iter()
        .filter(|(key, _)| fields.contains(&key.as_str()))
        .collect()
}
