use crate::{
    db::{
        schema::INDEX_NAME_PATTERN,
        tuple::{Tuple, TupleDesc},
    },
    error::{ErrorClass, ErrorOrigin},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// IndexError
///
/// Errors raised while defining, building, or reading secondary indexes.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IndexError {
    #[error("column `{column}` does not exist for the table")]
    ColumnNotFound { column: String },

    #[error(
        "invalid index name `{name}` as they must match the regular expression {}",
        INDEX_NAME_PATTERN
    )]
    InvalidIndexName { name: String },

    #[error("index `{name}` already exists")]
    IndexNameTaken { name: String },

    #[error("index `{existing}` already covers columns ({columns})")]
    DuplicateColumns { existing: String, columns: String },

    #[error("column `{column}` appears more than once in the index")]
    RepeatedColumn { column: String },

    #[error("an index requires at least one column")]
    NoColumns,

    #[error("index declares {len} columns, at most {max} are allowed")]
    TooManyColumns { len: usize, max: usize },

    #[error("index `{name}` does not exist")]
    IndexNotFound { name: String },

    #[error("prefix of {len} values exceeds the {max} columns of index `{index}`")]
    PrefixTooLong {
        index: String,
        len: usize,
        max: usize,
    },

    #[error("{0}")]
    DuplicateUniqueKey(UniqueKeyError),
}

impl IndexError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::ColumnNotFound { .. } | Self::IndexNotFound { .. } => ErrorClass::NotFound,
            Self::IndexNameTaken { .. }
            | Self::DuplicateColumns { .. }
            | Self::DuplicateUniqueKey(_) => ErrorClass::Conflict,
            Self::InvalidIndexName { .. }
            | Self::RepeatedColumn { .. }
            | Self::NoColumns
            | Self::TooManyColumns { .. }
            | Self::PrefixTooLong { .. } => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::IndexNotFound { .. } | Self::PrefixTooLong { .. } | Self::DuplicateUniqueKey(_) => {
                ErrorOrigin::Index
            }
            _ => ErrorOrigin::Schema,
        }
    }
}

///
/// UniqueKeyError
///
/// A row whose declared-column prefix collides with an existing entry of
/// a unique index. Carries the full offending index key; only the first
/// `prefix_len` fields are rendered.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UniqueKeyError {
    key: Tuple,
    desc: TupleDesc,
    prefix_len: usize,
    index_name: String,
}

impl UniqueKeyError {
    #[must_use]
    pub fn new(key: Tuple, desc: TupleDesc, prefix_len: usize, index_name: &str) -> Self {
        Self {
            key,
            desc,
            prefix_len,
            index_name: index_name.to_string(),
        }
    }

    /// Full index key of the offending row, primary-key suffix included.
    #[must_use]
    pub const fn key(&self) -> &Tuple {
        &self.key
    }

    #[must_use]
    pub const fn desc(&self) -> &TupleDesc {
        &self.desc
    }

    #[must_use]
    pub const fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Declared-column values as `[a,b]`.
    #[must_use]
    pub fn formatted_key(&self) -> String {
        format_key(&self.key, &self.desc, self.prefix_len)
    }
}

impl fmt::Display for UniqueKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate unique key given: {}", self.formatted_key())
    }
}

impl std::error::Error for UniqueKeyError {}

/// Render the first `n` fields of `key` under `desc`.
#[must_use]
pub fn format_key(key: &Tuple, desc: &TupleDesc, n: usize) -> String {
    desc.prefix_desc(n.min(desc.count())).format(key)
}
