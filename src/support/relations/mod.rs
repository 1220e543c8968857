//! Relations between model types.
//!
//! A [`Relation`] is a one-shot descriptor: a [`Builder`] already scoped to
//! the related type, plus the model that declared it. Resolving it performs
//! at most one request.

mod belongs_to;
mod child_of;
mod has_many;

use async_trait::async_trait;
use serde_json::Value as Json;

use crate::error::Result;
use crate::support::attributes::Value;
use crate::support::builder::Builder;
use crate::support::collection::Collection;
use crate::support::model::Model;

pub use belongs_to::BelongsTo;
pub use child_of::ChildOf;
pub use has_many::HasMany;

/// The resolved side of a relation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Related {
    #[default]
    None,
    One(Model),
    Many(Collection),
}

impl Related {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Self::One(model) => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Many(collection) => Some(collection),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Self::None => Json::Null,
            Self::One(model) => model.to_json(),
            Self::Many(collection) => collection.clone().into(),
        }
    }
}

impl From<Related> for Value {
    fn from(related: Related) -> Self {
        match related {
            Related::None => Value::Null,
            Related::One(model) => model.into(),
            Related::Many(collection) => collection.into(),
        }
    }
}

impl From<Option<Model>> for Related {
    fn from(model: Option<Model>) -> Self {
        model.map_or(Self::None, Self::One)
    }
}

/// Turn a relation descriptor into its result.
#[async_trait]
pub trait Resolve {
    /// The builder scoped to the related type.
    fn builder(&self) -> &Builder;

    fn builder_mut(&mut self) -> &mut Builder;

    /// The model that declared the relation.
    fn parent(&self) -> &Model;

    async fn resolve(&self) -> Result<Related>;
}

/// A relation declared by a model.
#[derive(Debug, Clone)]
pub enum Relation {
    HasMany(HasMany),
    BelongsTo(BelongsTo),
    ChildOf(ChildOf),
}

impl Relation {
    fn inner(&self) -> &(dyn Resolve + Send + Sync) {
        match self {
            Self::HasMany(relation) => relation,
            Self::BelongsTo(relation) => relation,
            Self::ChildOf(relation) => relation,
        }
    }

    fn inner_mut(&mut self) -> &mut (dyn Resolve + Send + Sync) {
        match self {
            Self::HasMany(relation) => relation,
            Self::BelongsTo(relation) => relation,
            Self::ChildOf(relation) => relation,
        }
    }

    #[must_use]
    pub fn builder(&self) -> &Builder {
        self.inner().builder()
    }

    #[must_use]
    pub fn parent(&self) -> &Model {
        self.inner().parent()
    }

    /// Template instance of the related type.
    pub fn related(&self) -> Result<&Model> {
        self.builder().model()
    }

    /// Attribute on the declaring model that holds the related id.
    #[must_use]
    pub fn foreign_key_name(&self) -> Option<&str> {
        match self {
            Self::HasMany(_) => None,
            Self::BelongsTo(relation) => Some(relation.foreign_key_name()),
            Self::ChildOf(relation) => Some(relation.foreign_key_name()),
        }
    }

    #[must_use]
    pub fn foreign_key(&self) -> Value {
        match self {
            Self::HasMany(_) => Value::Null,
            Self::BelongsTo(relation) => relation.foreign_key(),
            Self::ChildOf(relation) => relation.foreign_key(),
        }
    }

    /// Reconfigure the underlying builder, keeping the relation.
    #[must_use]
    pub fn tap(mut self, f: impl FnOnce(Builder) -> Builder) -> Self {
        let builder = std::mem::take(self.inner_mut().builder_mut());
        *self.inner_mut().builder_mut() = f(builder);
        self
    }

    /// Run a read-only builder operation and return its result as is.
    pub fn forward<R>(&self, f: impl FnOnce(&Builder) -> R) -> R {
        f(self.builder())
    }

    #[must_use]
    pub fn where_(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tap(|builder| builder.where_(name, value))
    }

    #[must_use]
    pub fn where_true(self, name: impl Into<String>) -> Self {
        self.tap(|builder| builder.where_true(name))
    }

    #[must_use]
    pub fn where_not(self, name: impl Into<String>) -> Self {
        self.tap(|builder| builder.where_not(name))
    }

    #[must_use]
    pub fn where_id(self, id: impl Into<Value>) -> Self {
        self.tap(|builder| builder.where_id(id))
    }

    pub async fn resolve(&self) -> Result<Related> {
        self.inner().resolve().await
    }
}

impl From<HasMany> for Relation {
    fn from(relation: HasMany) -> Self {
        Self::HasMany(relation)
    }
}

impl From<BelongsTo> for Relation {
    fn from(relation: BelongsTo) -> Self {
        Self::BelongsTo(relation)
    }
}

impl From<ChildOf> for Relation {
    fn from(relation: ChildOf) -> Self {
        Self::ChildOf(relation)
    }
}
