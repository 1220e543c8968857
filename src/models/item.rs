//! Checklist items.
//!
//! Items are addressed under their checklist, and unlike most resources
//! stamp `date_created` in epoch seconds.

use crate::models::DATETIME_SECONDS;
use crate::support::attributes::Cast;
use crate::support::schema::{Field, ModelKind, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Item",
    path: Some("/checklist_item"),
    nested: true,
    fields: &[
        Field::cast("date_created", DATETIME_SECONDS),
        Field::cast("id", Cast::String),
        Field::cast("orderindex", Cast::Float),
        Field::cast("resolved", Cast::Boolean),
        Field::cast("unresolved", Cast::Boolean),
        Field::one("assignee", ModelKind::Member),
        Field::many("children", ModelKind::Item),
    ],
    ..Schema::BASE
};
