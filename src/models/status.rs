use crate::support::attributes::Cast;
use crate::support::schema::{Field, Schema};

pub static SCHEMA: Schema = Schema {
    name: "Status",
    readonly: true,
    fields: &[Field::cast("orderindex", Cast::Float)],
    ..Schema::BASE
};
