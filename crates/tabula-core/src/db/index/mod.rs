//! Module: index
//! Responsibility: secondary index construction, replacement, and prefix lookup.
//! Does not own: schema validation rules or map storage.
//! Boundary: builders read a primary `OrderedMap` and produce `IndexData`;
//! `create_index` is the only path that changes a table's index set.

mod build;
mod create;
mod dispatch;
mod error;
mod fingerprint;
mod lookup;
mod mapping;
mod prefix;
mod rebuild;
mod unique;


pub use build::build_secondary_index;
pub use create::{CreateIndexRequest, CreateIndexReturn, create_index};
pub use dispatch::{LegacyIndexRebuild, build_secondary_index_for_table, build_secondary_ordered_index};
pub use error::{IndexError, UniqueKeyError, format_key};
pub use lookup::index_prefix_entries;
pub use mapping::{OrdinalMapping, index_key_mapping};
pub use prefix::{PrefixIter, RangeIterator};
pub use rebuild::{rebuild_index, rebuild_indexes};
pub use unique::build_unique_index;
