use crate::{
    config::Options,
    db::{
        context::Context,
        index::{
            build::build_secondary_index,
            error::{IndexError, UniqueKeyError},
            unique::build_unique_index,
        },
        map::OrderedMap,
        schema::{Index, Schema},
        table::{IndexData, StorageFormat, Table},
    },
    error::InternalError,
};

///
/// LegacyIndexRebuild
///
/// Rebuild hook for tables stored in the legacy format.
///

pub trait LegacyIndexRebuild: Send + Sync {
    fn rebuild_index(
        &self,
        ctx: &Context,
        table: &Table,
        index_name: &str,
    ) -> Result<IndexData, InternalError>;
}

/// Build data for `index` using the path matching the table's storage format.
pub fn build_secondary_index_for_table(
    ctx: &Context,
    table: &Table,
    index: &Index,
    options: &Options,
) -> Result<IndexData, InternalError> {
    options.debug_log(format!(
        "building index '{}' ({:?}, unique={}) over {} rows",
        index.name(),
        table.format(),
        index.is_unique(),
        table.row_data().len()
    ));

    match table.format() {
        StorageFormat::Legacy => {
            let Some(legacy) = options.legacy() else {
                return Err(InternalError::table_unsupported(format!(
                    "no legacy rebuild configured for index '{}'",
                    index.name()
                )));
            };

            legacy.rebuild_index(ctx, table, index.name())
        }
        StorageFormat::Ordered => {
            build_secondary_ordered_index(ctx, table.schema(), index, table.row_data().map())
        }
    }
}

/// Build data for `index` from an ordered primary map.
///
/// Unique indexes fail on the first prefix collision with a
/// `DuplicateUniqueKey` error carrying the offending key.
pub fn build_secondary_ordered_index(
    ctx: &Context,
    schema: &Schema,
    index: &Index,
    primary: &OrderedMap,
) -> Result<IndexData, InternalError> {
    if !index.is_unique() {
        return build_secondary_index(ctx, schema, index, primary);
    }

    build_unique_index(ctx, schema, index, primary, |_existing, new_key| {
        Err(IndexError::DuplicateUniqueKey(UniqueKeyError::new(
            new_key.clone(),
            index.key_desc().clone(),
            index.count(),
            index.name(),
        ))
        .into())
    })
}
