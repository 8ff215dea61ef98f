#[macro_use]
mod macros;

use std::fmt::{self, Display};

///
/// Encoding
///
/// Canonical field encoding used by tuple descriptors.
/// Every non-null encoded value is non-empty and orders correctly under
/// plain byte comparison.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Encoding {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float64,
    Bool,
    Text,
    Bytes,
}

impl Encoding {
    /// Return the full metadata descriptor for one encoding.
    #[must_use]
    pub const fn metadata(self) -> EncodingMetadata {
        encoding_registry!(metadata_from_registry, self)
    }

    #[must_use]
    pub const fn family(self) -> EncodingFamily {
        self.metadata().family
    }

    /// Encoded width in bytes, or `None` for variable-width encodings.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self.metadata().fixed_width {
            0 => None,
            width => Some(width),
        }
    }

    #[must_use]
    pub const fn is_textual(self) -> bool {
        self.metadata().is_textual
    }

    #[must_use]
    pub const fn is_variable_width(self) -> bool {
        self.metadata().fixed_width == 0
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        encoding_registry!(name_from_registry, self)
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// EncodingMetadata
///
/// Capability metadata shared across the tuple codec and schema layers.
/// A `fixed_width` of zero marks a variable-width encoding.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncodingMetadata {
    pub family: EncodingFamily,
    pub fixed_width: usize,
    pub is_textual: bool,
}

///
/// EncodingFamily
///
/// Coarse routing family used by value conversion and formatting.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EncodingFamily {
    Signed,
    Unsigned,
    Float,
    Bool,
    Text,
    Bytes,
}

/// Ordered list of all encodings in registry order.
pub const ALL_ENCODINGS: [Encoding; 12] = encoding_registry!(all_encodings_from_registry);

///
/// TESTS
///
