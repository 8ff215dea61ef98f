use crate::prelude::*;
use tabula_core::{db::schema::SchemaError, error::InternalError};

fn table() -> Table {
    let schema = Schema::new(vec![
        Column::new("pk", 1, Encoding::Int64).primary_key(),
        Column::new("val", 2, Encoding::Text).nullable(),
    ])
    .unwrap();

    Table::empty(schema)
        .write_rows(
            &Context::background(),
            [
                vec![Value::Int(1), Value::from("x")],
                vec![Value::Int(2), Value::from("x")],
                vec![Value::Int(3), Value::from("y")],
            ],
        )
        .unwrap()
}

#[test]
fn duplicate_unique_key_maps_to_index_kind() {
    let err = create_index(
        &Context::background(),
        &table(),
        &CreateIndexRequest::new(["val"]).unique(),
        &Options::default(),
    )
    .unwrap_err();

    assert_eq!(
        err.kind,
        ErrorKind::Index(IndexErrorKind::DuplicateUniqueKey {
            key: "[x]".to_string()
        })
    );
    assert_eq!(err.origin, ErrorOrigin::Index);
    assert_eq!(err.to_string(), "duplicate unique key given: [x]");
}

#[test]
fn plain_index_over_same_rows_succeeds() {
    let ctx = Context::background();
    let ret = create_index(
        &ctx,
        &table(),
        &CreateIndexRequest::new(["val"]),
        &Options::default(),
    )
    .unwrap();

    assert_eq!(ret.new_index.name(), "val");
    let xs = index_prefix_entries(&ctx, &ret.new_table, "val", &[Value::from("x")]).unwrap();
    assert_eq!(xs.len(), 2);

    let rebuilt = rebuild_indexes(&ctx, &ret.new_table, &Options::default()).unwrap();
    assert_eq!(
        rebuilt.index_rows("val").unwrap().fingerprint(),
        ret.new_table.index_rows("val").unwrap().fingerprint()
    );
}

#[test]
fn standalone_build_maps_errors_per_format() {
    let ctx = Context::background();
    let created = create_index(
        &ctx,
        &table(),
        &CreateIndexRequest::new(["val"]),
        &Options::default(),
    )
    .unwrap();

    let data =
        build_secondary_index(&ctx, &created.new_table, &created.new_index, &Options::default())
            .unwrap();
    assert_eq!(data.len(), 3);

    let legacy = created.new_table.with_format(StorageFormat::Legacy);
    let err = build_secondary_index(&ctx, &legacy, &created.new_index, &Options::default())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.origin, ErrorOrigin::Table);
}

#[test]
fn rebuild_index_maps_unknown_name_to_not_found() {
    let ctx = Context::background();
    let created = create_index(
        &ctx,
        &table(),
        &CreateIndexRequest::new(["val"]),
        &Options::default(),
    )
    .unwrap();

    let rebuilt = rebuild_index(&ctx, &created.new_table, "VAL", &Options::default()).unwrap();
    assert!(rebuilt.index_rows("val").is_some());

    let err = rebuild_index(&ctx, &created.new_table, "missing", &Options::default())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Index(IndexErrorKind::NotFound));
    assert_eq!(err.origin, ErrorOrigin::Index);
}

#[test]
fn unknown_column_maps_to_column_not_found() {
    let err = create_index(
        &Context::background(),
        &table(),
        &CreateIndexRequest::new(["nope"]),
        &Options::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Index(IndexErrorKind::ColumnNotFound));
    assert_eq!(err.origin, ErrorOrigin::Schema);
}

#[test]
fn cancellation_maps_to_cancelled() {
    let token = CancelToken::new();
    token.cancel();
    let ctx = Context::background().with_cancel(token);

    let err = rebuild_indexes(
        &ctx,
        &create_index(
            &Context::background(),
            &table(),
            &CreateIndexRequest::new(["val"]),
            &Options::default(),
        )
        .unwrap()
        .new_table,
        &Options::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Cancelled);
}

#[test]
fn schema_errors_map_to_schema_kind() {
    let err: Error = InternalError::from(SchemaError::NoPrimaryKey).into();

    assert_eq!(err.kind, ErrorKind::Schema);
    assert_eq!(err.origin.to_string(), "Schema");
}

#[test]
fn error_round_trips_through_json() {
    let err = Error::new(
        ErrorKind::Index(IndexErrorKind::NameTaken),
        ErrorOrigin::Schema,
        "index `ab` already exists",
    );

    let json = serde_json::to_string(&err).unwrap();
    let back: Error = serde_json::from_str(&json).unwrap();
    assert_eq!(back, err);
}

#[test]
fn version_matches_manifest() {
    assert_eq!(crate::VERSION, env!("CARGO_PKG_VERSION"));
}
