use crate::{
    db::{
        context::Context,
        schema::{Column, Schema},
        table::Table,
        tuple::{Tuple, TupleDesc, codec::decode_value},
    },
    value::Value,
};
use tabula_primitives::Encoding;

/// `id` (pk), `name`, `email`, `age`; every non-key column nullable.
pub(crate) fn people_schema() -> Schema {
    Schema::new(vec![
        Column::new("id", 1, Encoding::Int64).primary_key(),
        Column::new("name", 2, Encoding::Text).nullable(),
        Column::new("email", 3, Encoding::Text).nullable(),
        Column::new("age", 4, Encoding::Int32).nullable(),
    ])
    .unwrap()
}

pub(crate) fn person(id: i64, name: Option<&str>, email: Option<&str>, age: Option<i32>) -> Vec<Value> {
    vec![
        Value::Int(id),
        Value::from(name),
        Value::from(email),
        Value::from(age),
    ]
}

pub(crate) fn table_with(schema: Schema, rows: &[Vec<Value>]) -> Table {
    Table::empty(schema)
        .write_rows(&Context::background(), rows)
        .unwrap()
}

pub(crate) fn people(rows: &[Vec<Value>]) -> Table {
    table_with(people_schema(), rows)
}

/// Decode every field of `key` under `desc`.
pub(crate) fn decode_key(desc: &TupleDesc, key: &Tuple) -> Vec<Value> {
    (0..desc.count())
        .map(|i| decode_value(desc.field_type(i).encoding, key.field(i)).unwrap())
        .collect()
}
