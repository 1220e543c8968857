use crate::support::attributes::Cast;
use crate::support::schema::{Field, Schema};

pub static SCHEMA: Schema = Schema {
    name: "TaskTemplate",
    path: Some("/taskTemplate"),
    response_collection_key: Some("templates"),
    fields: &[Field::cast("id", Cast::String)],
    ..Schema::BASE
};
