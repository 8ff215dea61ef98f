use crate::{
    db::{
        context::{CancelToken, Context},
        index::IndexError,
        map::MutableMap,
        schema::IndexProperties,
        table::{IndexData, StorageFormat, Table},
        tuple::{CodecError, TupleDesc},
    },
    error::{ErrorClass, ErrorOrigin},
    test_support::{decode_key, people, people_schema, person},
    value::Value,
    MAX_INDEX_COLUMNS,
};

#[test]
fn write_rows_orders_by_primary_key_and_upserts() {
    let table = people(&[
        person(3, Some("c"), None, None),
        person(1, Some("a"), None, Some(30)),
        person(3, Some("c2"), None, None),
    ]);

    let rows = table.row_data().map();
    assert_eq!(rows.len(), 2);

    let keys: Vec<Vec<Value>> = rows
        .keys()
        .map(|key| decode_key(rows.key_desc(), key))
        .collect();
    assert_eq!(keys, vec![vec![Value::Int(1)], vec![Value::Int(3)]]);

    let value = rows.get(rows.keys().nth(1).unwrap()).unwrap();
    assert_eq!(
        decode_key(rows.value_desc(), value),
        vec![Value::from("c2"), Value::Null, Value::Null]
    );
}

#[test]
fn write_rows_leaves_receiver_untouched() {
    let base = people(&[person(1, Some("a"), None, None)]);
    let next = base
        .write_rows(&Context::background(), [person(2, None, None, None)])
        .unwrap();

    assert_eq!(base.row_data().len(), 1);
    assert_eq!(next.row_data().len(), 2);
}

#[test]
fn write_rows_rejects_bad_rows() {
    let table = Table::empty(people_schema());
    let ctx = Context::background();

    let err = table.write_rows(&ctx, [vec![Value::Int(1)]]).unwrap_err();
    assert_eq!(err.origin, ErrorOrigin::Codec);
    assert!(err.message.contains(&CodecError::FieldCountMismatch { expected: 4, found: 1 }.to_string()));

    let err = table
        .write_rows(&ctx, [vec![Value::Null, Value::Null, Value::Null, Value::Null]])
        .unwrap_err();
    assert_eq!(err.origin, ErrorOrigin::Codec);

    let err = table
        .write_rows(&ctx, [person(1, None, None, None).into_iter().rev().collect::<Vec<_>>()])
        .unwrap_err();
    assert_eq!(err.class, ErrorClass::Unsupported);
}

#[test]
fn write_rows_observes_cancellation() {
    let token = CancelToken::new();
    token.cancel();
    let ctx = Context::background().with_cancel(token);

    let err = Table::empty(people_schema())
        .write_rows(&ctx, [person(1, None, None, None)])
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn new_rejects_mismatched_row_layout() {
    let rows = MutableMap::new(TupleDesc::empty(), TupleDesc::empty()).map();

    let err = Table::new(people_schema(), rows).unwrap_err();
    assert_eq!(err.origin, ErrorOrigin::Table);
}

#[test]
fn index_rows_round_trip_by_case_insensitive_name() {
    let mut schema = people_schema();
    let index = schema
        .add_index_by_col_names("ByName", &["name"], IndexProperties::default(), MAX_INDEX_COLUMNS)
        .unwrap();
    let table = Table::empty(schema).with_format(StorageFormat::Legacy);
    assert_eq!(table.format(), StorageFormat::Legacy);

    let data = IndexData::new(MutableMap::new(index.key_desc().clone(), TupleDesc::empty()).map());
    let with_data = table.set_index_rows("BYNAME", data).unwrap();

    assert!(table.index_rows("byname").is_none());
    assert!(with_data.index_rows("byName").is_some());
    assert_eq!(with_data.index_data_names().collect::<Vec<_>>(), vec!["byname"]);

    let without = with_data.delete_index_row_data("BYNAME");
    assert!(without.index_rows("byname").is_none());
    assert!(with_data.index_rows("byname").is_some());
}

#[test]
fn set_index_rows_requires_defined_index_and_matching_layout() {
    let table = people(&[]);
    let data = IndexData::new(MutableMap::new(TupleDesc::empty(), TupleDesc::empty()).map());

    let err = table.set_index_rows("nope", data.clone()).unwrap_err();
    assert!(matches!(err.index_error(), Some(IndexError::IndexNotFound { .. })));

    let mut schema = people_schema();
    schema
        .add_index_by_col_names("by_age", &["age"], IndexProperties::default(), MAX_INDEX_COLUMNS)
        .unwrap();
    let err = table.update_schema(schema).set_index_rows("by_age", data).unwrap_err();
    assert_eq!(err.class, ErrorClass::InvariantViolation);
}
