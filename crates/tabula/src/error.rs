use derive_more::Display;
use serde::{Deserialize, Serialize};
use tabula_core::{
    db::index::IndexError,
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = if err.class == ErrorClass::Cancelled {
            ErrorKind::Cancelled
        } else if let Some(index_err) = err.index_error() {
            ErrorKind::Index(index_err.into())
        } else {
            match err.origin {
                CoreErrorOrigin::Schema | CoreErrorOrigin::Interface => ErrorKind::Schema,
                CoreErrorOrigin::Store | CoreErrorOrigin::Codec => ErrorKind::Store,
                CoreErrorOrigin::Index | CoreErrorOrigin::Table => ErrorKind::Internal,
            }
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Schema or option input is invalid.
    Schema,

    Index(IndexErrorKind),

    /// Stored or supplied data could not be read or encoded.
    Store,

    /// The context was cancelled or its deadline passed.
    Cancelled,

    /// The caller cannot remediate this.
    Internal,
}

///
/// IndexErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum IndexErrorKind {
    /// A requested column does not exist.
    ColumnNotFound,

    /// The index name breaks the naming grammar.
    InvalidName,

    /// Another index already uses the name.
    NameTaken,

    /// A user-defined index already covers the same columns.
    DuplicateColumns,

    /// Column list is empty, repeats a column, or is too long.
    InvalidColumns,

    NotFound,

    PrefixTooLong,

    /// Unique index data would contain two equal keys.
    DuplicateUniqueKey { key: String },
}

impl From<&IndexError> for IndexErrorKind {
    fn from(err: &IndexError) -> Self {
        match err {
            IndexError::ColumnNotFound { .. } => Self::ColumnNotFound,
            IndexError::InvalidIndexName { .. } => Self::InvalidName,
            IndexError::IndexNameTaken { .. } => Self::NameTaken,
            IndexError::DuplicateColumns { .. } => Self::DuplicateColumns,
            IndexError::RepeatedColumn { .. }
            | IndexError::NoColumns
            | IndexError::TooManyColumns { .. } => Self::InvalidColumns,
            IndexError::IndexNotFound { .. } => Self::NotFound,
            IndexError::PrefixTooLong { .. } => Self::PrefixTooLong,
            IndexError::DuplicateUniqueKey(dup) => Self::DuplicateUniqueKey {
                key: dup.formatted_key(),
            },
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Codec,
    Index,
    Interface,
    Schema,
    Store,
    Table,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Codec => Self::Codec,
            CoreErrorOrigin::Index => Self::Index,
            CoreErrorOrigin::Interface => Self::Interface,
            CoreErrorOrigin::Schema => Self::Schema,
            CoreErrorOrigin::Store => Self::Store,
            CoreErrorOrigin::Table => Self::Table,
        }
    }
}
