//! Index naming grammar.
//!
//! Names are 1..=64 ASCII characters drawn from `[-$_0-9a-zA-Z]`.
//! Uniqueness is case-insensitive and enforced by the index collection.

/// Maximum index name length in bytes.
pub const MAX_INDEX_NAME_LEN: usize = 64;

/// Grammar quoted in user-facing errors.
pub const INDEX_NAME_PATTERN: &str = "^[-$_0-9a-zA-Z]+$";

/// Whether `name` satisfies the index naming grammar.
#[must_use]
pub fn is_valid_index_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_INDEX_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'$' | b'_'))
}
