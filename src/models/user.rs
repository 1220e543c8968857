//! The user that owns the API token.

use crate::support::attributes::Cast;
use crate::support::schema::{Field, Schema};

pub static SCHEMA: Schema = Schema {
    name: "User",
    path: Some("/user"),
    readonly: true,
    fields: &[
        Field::cast("global_font_support", Cast::Boolean),
        Field::cast("id", Cast::Integer),
        Field::cast("week_start_day", Cast::Integer),
    ],
    ..Schema::BASE
};
