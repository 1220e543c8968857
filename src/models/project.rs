//! The legacy project embedded in tasks. Projects are now folders.

use crate::support::attributes::Cast;
use crate::support::schema::{Field, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Project",
    readonly: true,
    fields: &[
        Field::cast("id", Cast::Integer),
        Field::cast("hidden", Cast::Boolean),
        Field::cast("access", Cast::Boolean),
    ],
    ..Schema::BASE
};
