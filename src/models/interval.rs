//! Time tracking intervals, only ever embedded in a time entry.

use crate::models::DATETIME;
use crate::support::attributes::Cast;
use crate::support::schema::{Field, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Interval",
    fields: &[
        Field::cast("date_added", DATETIME),
        Field::cast("end", DATETIME),
        Field::cast("id", Cast::String),
        Field::cast("start", DATETIME),
        Field::cast("time", Cast::Integer),
    ],
    ..Schema::BASE
};
