//! ## Crate layout
//! - `core`: tuples, ordered maps, schemas, table snapshots, and index builds.
//! - `primitives`: field encodings and their capability metadata.
//! - `error`: the public error taxonomy.
//! - `index`: index operations returning public errors.
//!
//! The `prelude` module mirrors what an embedding caller typically needs.

pub use tabula_core as core;
pub use tabula_primitives as primitives;

pub mod error;
pub mod index;

#[cfg(test)]
mod tests;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::{Error, ErrorKind, ErrorOrigin, IndexErrorKind},
        index::{
            build_secondary_index, create_index, index_prefix_entries, rebuild_index,
            rebuild_indexes,
        },
    };
    pub use tabula_core::{
        config::Options,
        db::{
            context::{CancelToken, Context},
            index::{CreateIndexRequest, CreateIndexReturn},
            schema::{Column, Index, IndexProperties, Schema},
            table::{StorageFormat, Table},
        },
        obs::{metrics_report, metrics_reset_all},
        value::Value,
    };
    pub use tabula_primitives::Encoding;
}
