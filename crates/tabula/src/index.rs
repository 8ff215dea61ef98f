//! Index operations with errors mapped onto the public taxonomy.

use crate::Error;
use tabula_core::{
    config::Options,
    db::{
        context::Context,
        index::{self, CreateIndexRequest, CreateIndexReturn},
        schema::Index,
        table::{IndexData, Table},
        tuple::Tuple,
    },
    value::Value,
};

/// Add an index to `table` and build its data.
pub fn create_index(
    ctx: &Context,
    table: &Table,
    request: &CreateIndexRequest,
    options: &Options,
) -> Result<CreateIndexReturn, Error> {
    Ok(index::create_index(ctx, table, request, options)?)
}

/// Build data for `index` over `table` without attaching it.
pub fn build_secondary_index(
    ctx: &Context,
    table: &Table,
    index: &Index,
    options: &Options,
) -> Result<IndexData, Error> {
    Ok(index::build_secondary_index_for_table(ctx, table, index, options)?)
}

/// Rebuild every index of `table`.
pub fn rebuild_indexes(ctx: &Context, table: &Table, options: &Options) -> Result<Table, Error> {
    Ok(index::rebuild_indexes(ctx, table, options)?)
}

/// Rebuild the single index named `index_name`.
pub fn rebuild_index(
    ctx: &Context,
    table: &Table,
    index_name: &str,
    options: &Options,
) -> Result<Table, Error> {
    Ok(index::rebuild_index(ctx, table, index_name, options)?)
}

/// Keys of `index_name` whose leading declared columns equal `prefix`.
pub fn index_prefix_entries(
    ctx: &Context,
    table: &Table,
    index_name: &str,
    prefix: &[Value],
) -> Result<Vec<Tuple>, Error> {
    Ok(index::index_prefix_entries(ctx, table, index_name, prefix)?)
}
