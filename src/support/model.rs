//! Models: local handles on remote ClickUp resources.
//!
//! A [`Model`] owns its attributes, knows its place in the resource
//! hierarchy through an optional parent, and resolves its own request path
//! from that ancestry. Persistence and relation lookups go through the
//! client of the model or, failing that, of its closest ancestor.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};

use crate::client::ClickUpClient;
use crate::error::{ClickUpError, Result};
use crate::support::attributes::{self, Attributes, Value};
use crate::support::builder::{peel, Builder};
use crate::support::collection::Collection;
use crate::support::query;
use crate::support::relations::{BelongsTo, ChildOf, HasMany, Related, Relation};
use crate::support::schema::{FieldKind, ModelKind, Schema};

/// One instance of a ClickUp resource.
#[derive(Clone)]
pub struct Model {
    kind: ModelKind,
    attributes: Attributes,
    relations: BTreeMap<String, Related>,
    exists: bool,
    readonly: bool,
    parent: Option<Arc<Model>>,
    client: Option<ClickUpClient>,
}

impl Model {
    /// A blank, transient model of the given type.
    #[must_use]
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            relations: BTreeMap::new(),
            exists: false,
            readonly: kind.schema().readonly,
            parent: None,
            client: None,
        }
    }

    /// A transient model filled with the given attributes.
    pub fn make<I, K, V>(kind: ModelKind, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut model = Self::new(kind);
        model.fill(attributes)?;
        Ok(model)
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<Arc<Model>>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn set_parent(&mut self, parent: Option<Arc<Model>>) -> &mut Self {
        self.parent = parent;
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: ClickUpClient) -> Self {
        self.client = Some(client);
        self
    }

    pub fn set_client(&mut self, client: Option<ClickUpClient>) -> &mut Self {
        self.client = client;
        self
    }

    /// The client of this model, or of its closest ancestor that has one.
    pub fn client(&self) -> Result<&ClickUpClient> {
        match (&self.client, &self.parent) {
            (Some(client), _) => Ok(client),
            (None, Some(parent)) => parent.client(),
            (None, None) => Err(ClickUpError::NoClient),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.kind.schema()
    }

    /// Whether the resource is known to exist remotely.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) -> &mut Self {
        self.readonly = readonly;
        self
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.schema().nested
    }

    #[must_use]
    pub fn key_name(&self) -> &'static str {
        self.schema().primary_key
    }

    /// The primary key, cast.
    #[must_use]
    pub fn key(&self) -> Value {
        self.attribute(self.key_name())
    }

    /// Whether a usable primary key is set.
    #[must_use]
    pub fn has_key(&self) -> bool {
        self.key_segment().is_some()
    }

    #[must_use]
    pub fn response_key(&self) -> String {
        self.schema().response_key()
    }

    #[must_use]
    pub fn response_collection_key(&self) -> String {
        self.schema().response_collection_key()
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Model> {
        self.parent.as_deref()
    }

    pub(crate) fn parent_arc(&self) -> Option<Arc<Model>> {
        self.parent.clone()
    }

    /// Type of the parent, used by relations that only apply under one.
    #[must_use]
    pub fn parent_kind(&self) -> Option<ModelKind> {
        self.parent.as_ref().map(|parent| parent.kind)
    }

    fn key_segment(&self) -> Option<String> {
        attributes::key_segment(self.attributes.get(self.key_name())?)
    }

    // ---------------------------------------------------------------------
    // Reading
    // ---------------------------------------------------------------------

    /// Read an attribute without touching the network.
    ///
    /// Declared fields are cast or materialised, other stored attributes are
    /// returned raw, and already loaded relations come from the cache.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Value {
        if let Some(field) = self.schema().field(key) {
            let Some(raw) = self.attributes.get(key) else {
                return Value::Null;
            };

            return match field.kind {
                FieldKind::Cast(cast) => cast.apply(raw),
                FieldKind::One(kind) => self.given_one(kind, raw),
                FieldKind::Many(kind) => self.given_many(kind, raw, false),
                FieldKind::ManyUnwrapped(kind) => self.given_many(kind, raw, true),
            };
        }

        if let Some(raw) = self.attributes.get(key) {
            return Value::from(raw.clone());
        }

        self.relations
            .get(key)
            .map_or(Value::Null, |related| related.clone().into())
    }

    /// Read an attribute, resolving and caching a relation of that name if
    /// no attribute answers to it.
    pub async fn get_attribute(&mut self, key: &str) -> Result<Value> {
        if self.schema().field(key).is_some()
            || self.attributes.contains(key)
            || self.relations.contains_key(key)
        {
            return Ok(self.attribute(key));
        }

        if self.schema().relation(key).is_none() {
            return Ok(Value::Null);
        }

        Ok(self.load(key).await?.into())
    }

    /// Resolve a relation once and remember the result for this instance.
    pub async fn load(&mut self, name: &str) -> Result<Related> {
        if let Some(cached) = self.relations.get(name) {
            tracing::debug!(model = %self.kind, relation = name, "relation cache hit");
            return Ok(cached.clone());
        }

        let related = match self.relation(name)? {
            Some(relation) => relation.resolve().await?,
            None => Related::None,
        };

        self.relations.insert(name.to_string(), related.clone());
        Ok(related)
    }

    /// The relation descriptor declared under `name`.
    ///
    /// `Ok(None)` when the relation does not apply to this instance (for
    /// example a `list` relation on a comment loaded through a task).
    pub fn relation(&self, name: &str) -> Result<Option<Relation>> {
        let declared = self.schema().relation(name).ok_or_else(|| {
            ClickUpError::UnsupportedOperation(format!("{}::{name}", self.kind))
        })?;

        (declared.declare)(self)
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.attribute(key) {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.attribute(key).as_i64()
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.attribute(key).as_f64()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.attribute(key).as_bool()
    }

    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.attribute(key).as_datetime().copied()
    }

    /// Whether the attribute reads as something other than null.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        !self.attribute(key).is_null()
    }

    // ---------------------------------------------------------------------
    // Writing
    // ---------------------------------------------------------------------

    /// Set one attribute, passing it through the field's storage conversion.
    ///
    /// # Errors
    ///
    /// [`ClickUpError::Readonly`] if the model is read-only.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<&mut Self> {
        self.ensure_writable()?;

        let key = key.into();
        let stored = match self.schema().cast(&key) {
            Some(cast) => cast.store(value.into()),
            None => value.into().into_json(),
        };

        self.attributes.set(key, stored);
        Ok(self)
    }

    /// Set several attributes at once.
    pub fn fill<I, K, V>(&mut self, attributes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in attributes {
            self.set_attribute(key, value)?;
        }
        Ok(self)
    }

    /// Forget an attribute and any relation cached under the same name.
    pub fn unset(&mut self, key: &str) -> &mut Self {
        self.attributes.remove(key);
        self.relations.remove(key);
        self
    }

    /// Store a raw value, bypassing casts and the read-only guard.
    pub(crate) fn set_raw(&mut self, key: impl Into<String>, value: Json) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.readonly {
            return Err(ClickUpError::Readonly {
                model: self.kind.name(),
            });
        }
        Ok(())
    }

    /// Raw attributes as last stored.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Json> {
        self.attributes.current()
    }

    #[must_use]
    pub fn original(&self) -> &Map<String, Json> {
        self.attributes.original()
    }

    /// Fields sent by the last successful update.
    #[must_use]
    pub fn changes(&self) -> &Map<String, Json> {
        self.attributes.changes()
    }

    #[must_use]
    pub fn get_dirty(&self) -> Map<String, Json> {
        let schema = self.schema();
        self.attributes.dirty(|key| schema.cast(key))
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.get_dirty().is_empty()
    }

    pub fn sync_original(&mut self) -> &mut Self {
        self.attributes.sync_original();
        self
    }

    pub fn sync_changes(&mut self) -> &mut Self {
        let schema = self.schema();
        self.attributes.sync_changes(|key| schema.cast(key));
        self
    }

    /// Replace all attributes without conversion, optionally as the new
    /// synced baseline.
    pub fn set_raw_attributes(&mut self, attributes: Map<String, Json>, sync: bool) -> &mut Self {
        self.attributes.replace(attributes, sync);
        self
    }

    #[must_use]
    pub fn relation_loaded(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    pub fn set_relation(&mut self, name: impl Into<String>, related: Related) -> &mut Self {
        self.relations.insert(name.into(), related);
        self
    }

    #[must_use]
    pub fn relations(&self) -> &BTreeMap<String, Related> {
        &self.relations
    }

    // ---------------------------------------------------------------------
    // Instances
    // ---------------------------------------------------------------------

    fn blank_instance(&self) -> Self {
        let mut model = Self::new(self.kind);
        model.parent = self.parent.clone();
        model.client = self.client.clone();
        model
    }

    /// A model of the same type, parent and client.
    pub fn new_instance<I, K, V>(&self, attributes: I, exists: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut model = self.blank_instance();
        model.fill(attributes)?;
        model.exists = exists;
        Ok(model)
    }

    /// Hydrate an existing record from an API payload.
    #[must_use]
    pub fn new_from_builder(&self, attributes: Map<String, Json>) -> Self {
        let mut model = self.blank_instance();
        model.attributes.replace(attributes, true);
        model.exists = true;
        model
    }

    /// A blank model of another type sharing this model's parent and client.
    fn sibling(&self, kind: ModelKind) -> Self {
        let mut model = Self::new(kind);
        model.parent = self.parent.clone();
        model.client = self.client().ok().cloned();
        model
    }

    /// Materialise an embedded object as a model.
    #[must_use]
    pub fn given_one(&self, kind: ModelKind, raw: &Json) -> Value {
        match raw {
            Json::Object(attributes) => self.sibling(kind).new_from_builder(attributes.clone()).into(),
            other => Value::from(other.clone()),
        }
    }

    /// Materialise an embedded array as a collection.
    ///
    /// With `unwrap`, every element is a single-key wrapper whose inner
    /// object is the actual record.
    #[must_use]
    pub fn given_many(&self, kind: ModelKind, raw: &Json, unwrap: bool) -> Value {
        let Json::Array(items) = raw else {
            return Value::from(raw.clone());
        };

        let template = self.sibling(kind);
        items
            .iter()
            .filter_map(|item| {
                if unwrap {
                    item.as_object()?.values().next()?.as_object()
                } else {
                    item.as_object()
                }
            })
            .map(|attributes| template.new_from_builder(attributes.clone()))
            .collect::<Collection>()
            .into()
    }

    // ---------------------------------------------------------------------
    // Relation declarations
    // ---------------------------------------------------------------------

    fn related_builder(&self, kind: ModelKind) -> Result<Builder> {
        if kind.schema().path.is_none() {
            return Err(ClickUpError::Configuration(format!(
                "{} cannot relate to {kind}: {kind} has no resource path",
                self.kind
            )));
        }

        Ok(Builder::new()
            .set_kind(kind)
            .set_client(self.client().ok().cloned()))
    }

    /// Records of `kind` listed under this model.
    pub fn has_many(&self, kind: ModelKind) -> Result<Relation> {
        let builder = self
            .related_builder(kind)?
            .set_parent(Arc::new(self.clone()));

        Ok(HasMany::new(builder, self.clone()).into())
    }

    /// The record of `kind` whose id this model holds in the conventional
    /// foreign key attribute.
    pub fn belongs_to(&self, kind: ModelKind) -> Result<Relation> {
        self.belongs_to_with_key(kind, &kind.schema().foreign_key())
    }

    pub fn belongs_to_with_key(&self, kind: ModelKind, foreign_key: &str) -> Result<Relation> {
        let builder = self.related_builder(kind)?;

        Ok(BelongsTo::new(builder, self.clone(), foreign_key).into())
    }

    /// The parent this model was loaded through.
    pub fn child_of(&self, kind: ModelKind) -> Result<Relation> {
        self.child_of_with_key(kind, &kind.schema().foreign_key())
    }

    pub fn child_of_with_key(&self, kind: ModelKind, foreign_key: &str) -> Result<Relation> {
        let builder = self
            .related_builder(kind)?
            .set_parent(Arc::new(self.clone()));

        Ok(ChildOf::new(builder, self.clone(), foreign_key).into())
    }

    // ---------------------------------------------------------------------
    // Paths
    // ---------------------------------------------------------------------

    /// Request path of this model.
    ///
    /// `extra` is appended after the id, `filters` become the query string.
    /// Without an id, or when the type is nested, the whole thing is then
    /// placed under the parent's own path.
    #[must_use]
    pub fn path(&self, extra: Option<&str>, filters: &[(String, Json)]) -> String {
        let mut path = self
            .schema()
            .path
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();

        let key = self.key_segment();
        if let Some(key) = &key {
            path.push('/');
            path.push_str(&urlencoding::encode(key));
        }

        if let Some(extra) = extra {
            path.push('/');
            path.push_str(extra.trim_start_matches('/'));
        }

        if !filters.is_empty() {
            path.push('?');
            path.push_str(&query::encode(filters));
        }

        match &self.parent {
            Some(parent) if key.is_none() || self.is_nested() => parent.path(Some(&path), &[]),
            _ => path,
        }
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Create or update the remote record.
    ///
    /// A transient model is POSTed in full; an existing one PUTs only its
    /// dirty fields. Either way the server's response becomes the new
    /// attribute set. Read-only models are never sent (`Ok(false)`), clean
    /// models are a successful no-op.
    ///
    /// Transport failures are logged and reported as `Ok(false)`; missing
    /// client or credentials are still errors.
    #[tracing::instrument(skip(self), fields(model = %self.kind, exists = self.exists))]
    pub async fn save(&mut self) -> Result<bool> {
        if self.readonly {
            return Ok(false);
        }

        if !self.is_dirty() {
            return Ok(true);
        }

        let client = self.client()?.clone();
        let path = self.path(None, &[]);

        if self.exists {
            let dirty = Json::Object(self.get_dirty());
            let response = match absorb(client.put(&path, &dirty).await)? {
                Some(response) => response,
                None => return Ok(false),
            };

            self.sync_changes();
            self.accept(response);
            return Ok(true);
        }

        let response = match absorb(client.post(&path, &self.to_json()).await)? {
            Some(response) => response,
            None => return Ok(false),
        };

        self.exists = true;
        self.accept(response);
        Ok(true)
    }

    /// Like [`save`](Self::save), but a failed save is an error.
    pub async fn save_or_fail(&mut self) -> Result<()> {
        if self.save().await? {
            Ok(())
        } else {
            Err(ClickUpError::UnableToSave {
                model: self.kind.name(),
            })
        }
    }

    /// Delete the remote record.
    ///
    /// `Ok(false)` for read-only models and on transport failure. The local
    /// instance is left untouched.
    #[tracing::instrument(skip(self), fields(model = %self.kind))]
    pub async fn delete(&self) -> Result<bool> {
        if self.readonly {
            return Ok(false);
        }

        let client = self.client()?;
        Ok(absorb(client.delete(&self.path(None, &[])).await)?.is_some())
    }

    /// The server is authoritative after a write.
    fn accept(&mut self, response: Json) {
        match peel(self.schema(), response) {
            Json::Object(attributes) => {
                self.attributes.replace(attributes, true);
            }
            _ => {
                self.attributes.sync_original();
            }
        }
    }

    // ---------------------------------------------------------------------
    // Serialization
    // ---------------------------------------------------------------------

    /// Raw attributes plus loaded relations.
    #[must_use]
    pub fn to_json(&self) -> Json {
        let mut json = self.attributes.current().clone();
        for (name, related) in &self.relations {
            json.insert(name.clone(), related.to_json());
        }
        Json::Object(json)
    }
}

/// Turn transport failures into `None`, keeping every other error.
fn absorb(result: Result<Json>) -> Result<Option<Json>> {
    match result {
        Ok(response) => Ok(Some(response)),
        Err(e) if e.is_transport() => {
            tracing::warn!(error = %e, "write to ClickUp failed");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("kind", &self.kind)
            .field("exists", &self.exists)
            .field("readonly", &self.readonly)
            .field("attributes", self.attributes.current())
            .field("relations", &self.relations.keys().collect::<Vec<_>>())
            .field("parent", &self.parent_kind())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.exists == other.exists
            && self.readonly == other.readonly
            && self.attributes == other.attributes
            && self.relations == other.relations
            && self.parent == other.parent
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
