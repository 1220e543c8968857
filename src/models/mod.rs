//! ClickUp resource types.
//!
//! Each module declares the [`Schema`](crate::support::Schema) of one
//! resource: where it lives, how its fields are cast and what it relates to.

pub mod checklist;
pub mod comment;
pub mod field;
pub mod folder;
pub mod goal;
pub mod interval;
pub mod item;
pub mod key_result;
pub mod member;
pub mod priority;
pub mod project;
pub mod share;
pub mod space;
pub mod status;
pub mod tag;
pub mod task;
pub mod task_list;
pub mod task_template;
pub mod team;
pub mod time;
pub mod user;
pub mod view;
pub mod webhook;

use crate::error::Result;
use crate::support::attributes::{Cast, Precision};
use crate::support::model::Model;
use crate::support::relations::Relation;
use crate::support::schema::ModelKind;

/// Epoch milliseconds, the ClickUp default.
pub(crate) const DATETIME: Cast = Cast::DateTime(Precision::Milliseconds);

pub(crate) const DATETIME_SECONDS: Cast = Cast::DateTime(Precision::Seconds);

/// The parent relation, when the model was loaded through a `kind`.
pub(crate) fn child_of_parent(model: &Model, kind: ModelKind) -> Result<Option<Relation>> {
    if model.parent_kind() == Some(kind) {
        model.child_of(kind).map(Some)
    } else {
        Ok(None)
    }
}
