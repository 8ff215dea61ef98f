//! Core runtime for Tabula: immutable table snapshots and the
//! construction of secondary indexes over them.

pub mod config;
pub mod db;
pub mod error;
pub mod obs;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Upper bound on declared columns per secondary index.
pub const MAX_INDEX_COLUMNS: usize = 16;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::Options,
        db::{
            context::{CancelToken, Context},
            index::{
                CreateIndexRequest, CreateIndexReturn, create_index, index_prefix_entries,
                rebuild_indexes,
            },
            schema::{Column, IndexProperties, Schema},
            table::{StorageFormat, Table},
        },
        error::InternalError,
        value::Value,
    };
    pub use tabula_primitives::Encoding;
}
