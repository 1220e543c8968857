//! The model layer: attributes, schemas, builders and relations.

pub mod attributes;
pub mod builder;
pub mod collection;
pub mod model;
pub mod query;
pub mod relations;
pub mod schema;

pub use attributes::{Attributes, Cast, Precision, Value};
pub use builder::Builder;
pub use collection::Collection;
pub use model::Model;
pub use query::Filters;
pub use relations::{BelongsTo, ChildOf, HasMany, Related, Relation, Resolve};
pub use schema::{Field, FieldKind, ModelKind, RelationDef, Schema};
