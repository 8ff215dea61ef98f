use crate::{
    config::Options,
    db::{
        context::Context,
        index::{IndexError, dispatch::build_secondary_index_for_table},
        table::Table,
    },
    error::InternalError,
};

/// Rebuild the data of every index the table's schema defines.
///
/// Builds run in schema order and stop at the first failure; the input
/// table is unchanged either way.
pub fn rebuild_indexes(
    ctx: &Context,
    table: &Table,
    options: &Options,
) -> Result<Table, InternalError> {
    let mut rebuilt = table.clone();

    for index in table.schema().indexes().iter() {
        let data = build_secondary_index_for_table(ctx, table, index, options)?;
        rebuilt = rebuilt.set_index_rows(index.name(), data)?;
    }

    Ok(rebuilt)
}

/// Rebuild the data of one index, looked up case-insensitively.
pub fn rebuild_index(
    ctx: &Context,
    table: &Table,
    index_name: &str,
    options: &Options,
) -> Result<Table, InternalError> {
    let index = table
        .schema()
        .indexes()
        .get_by_name_case_insensitive(index_name)
        .ok_or_else(|| IndexError::IndexNotFound {
            name: index_name.to_string(),
        })?;

    let data = build_secondary_index_for_table(ctx, table, index, options)?;

    table.set_index_rows(index.name(), data)
}
