use crate::support::attributes::Cast;
use crate::support::schema::{Field, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Priority",
    readonly: true,
    fields: &[
        Field::cast("id", Cast::Integer),
        Field::cast("orderindex", Cast::Float),
    ],
    ..Schema::BASE
};
