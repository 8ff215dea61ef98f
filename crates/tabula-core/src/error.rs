use crate::db::{index::IndexError, index::UniqueKeyError, tuple::CodecError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; the `tabula` facade maps it onto the public taxonomy.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError with optional origin-specific detail.
    /// Store invariant violations get a default `StoreError` detail;
    /// everything else is detail-free.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        let message = message.into();

        let detail = matches!(
            (class, origin),
            (ErrorClass::InvariantViolation, ErrorOrigin::Store)
        )
        .then(|| {
            ErrorDetail::Store(StoreError::InvariantViolation {
                message: message.clone(),
            })
        });

        Self {
            class,
            origin,
            message,
            detail,
        }
    }

    /// Construct an index-origin invariant violation.
    pub(crate) fn index_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Index,
            message.into(),
        )
    }

    /// Construct a store-origin invariant violation.
    pub(crate) fn store_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Store,
            message.into(),
        )
    }

    /// Construct a table-origin unsupported error.
    pub(crate) fn table_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Table, message.into())
    }

    /// Construct the error returned when a scan observes a cancelled context.
    pub(crate) fn cancelled() -> Self {
        let detail = StoreError::Cancelled;

        Self {
            class: ErrorClass::Cancelled,
            origin: ErrorOrigin::Store,
            message: detail.to_string(),
            detail: Some(ErrorDetail::Store(detail)),
        }
    }

    /// Construct the error returned when a scan outlives its deadline.
    pub(crate) fn deadline_exceeded() -> Self {
        let detail = StoreError::DeadlineExceeded;

        Self {
            class: ErrorClass::Cancelled,
            origin: ErrorOrigin::Store,
            message: detail.to_string(),
            detail: Some(ErrorDetail::Store(detail)),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.class, ErrorClass::Cancelled)
    }

    /// Borrow the typed index error detail, if any.
    #[must_use]
    pub const fn index_error(&self) -> Option<&IndexError> {
        match &self.detail {
            Some(ErrorDetail::Index(err)) => Some(err),
            _ => None,
        }
    }

    /// Borrow the duplicate-key payload when this error is a unique violation.
    #[must_use]
    pub const fn unique_key_error(&self) -> Option<&UniqueKeyError> {
        match self.index_error() {
            Some(IndexError::DuplicateUniqueKey(err)) => Some(err),
            _ => None,
        }
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Store(StoreError),

    #[error("{0}")]
    Index(IndexError),
}

impl From<IndexError> for InternalError {
    fn from(err: IndexError) -> Self {
        Self {
            class: err.class(),
            origin: err.origin(),
            message: err.to_string(),
            detail: Some(ErrorDetail::Index(err)),
        }
    }
}

impl From<CodecError> for InternalError {
    fn from(err: CodecError) -> Self {
        let class = match &err {
            CodecError::InvalidLayout { .. } | CodecError::Malformed { .. } => {
                ErrorClass::Corruption
            }
            _ => ErrorClass::Unsupported,
        };

        Self::new(class, ErrorOrigin::Codec, err.to_string())
    }
}

///
/// StoreError
///
/// Store-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Store`].
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("store invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("scan cancelled")]
    Cancelled,

    #[error("scan deadline exceeded")]
    DeadlineExceeded,
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Corruption,
    NotFound,
    Internal,
    Conflict,
    Unsupported,
    InvariantViolation,
    Cancelled,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::Conflict => "conflict",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Codec,
    Store,
    Schema,
    Index,
    Table,
    Interface,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Codec => "codec",
            Self::Store => "store",
            Self::Schema => "schema",
            Self::Index => "index",
            Self::Table => "table",
            Self::Interface => "interface",
        };
        write!(f, "{label}")
    }
}
