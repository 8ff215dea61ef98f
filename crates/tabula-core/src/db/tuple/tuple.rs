use crate::db::tuple::CodecError;
use std::{fmt, sync::Arc};

const COUNT_BYTES: usize = 2;
const OFFSET_BYTES: usize = 4;

/// Upper bound on fields per tuple, fixed by the two-byte count trailer.
pub const MAX_TUPLE_FIELDS: usize = u16::MAX as usize;

///
/// Tuple
///
/// Immutable, fixed-layout sequence of raw encoded fields.
///
/// Stored layout: `field bytes ‖ end offsets (u32 LE, one per field) ‖ count (u16 LE)`.
/// A zero-length field is null. Clones share the same backing buffer.
///

#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Tuple(Arc<[u8]>);

impl Tuple {
    /// The zero-field tuple used as the value of every secondary index entry.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_fields(std::iter::empty())
    }

    /// Assemble a tuple from raw fields in order; `None` and empty slices are null.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_fields<'a>(fields: impl ExactSizeIterator<Item = Option<&'a [u8]>>) -> Self {
        let count = fields.len();
        debug_assert!(count <= MAX_TUPLE_FIELDS, "tuple field count {count} exceeds max");

        let mut data = Vec::new();
        let mut ends = Vec::with_capacity(count);
        for field in fields {
            if let Some(bytes) = field {
                data.extend_from_slice(bytes);
            }
            debug_assert!(u32::try_from(data.len()).is_ok(), "tuple exceeds 4 GiB");
            ends.push(data.len() as u32);
        }

        data.reserve(count * OFFSET_BYTES + COUNT_BYTES);
        for end in ends {
            data.extend_from_slice(&end.to_le_bytes());
        }
        data.extend_from_slice(&(count as u16).to_le_bytes());

        Self(data.into())
    }

    /// Validate a stored byte buffer and wrap it as a tuple.
    pub fn try_from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, CodecError> {
        let bytes: Vec<u8> = bytes.into();
        let invalid = |reason| CodecError::InvalidLayout { reason };

        if bytes.len() < COUNT_BYTES {
            return Err(invalid("missing field count"));
        }

        let count = read_count(&bytes);
        let trailer = count * OFFSET_BYTES + COUNT_BYTES;
        if bytes.len() < trailer {
            return Err(invalid("truncated offset table"));
        }

        let data_len = bytes.len() - trailer;
        let mut prev = 0;
        for i in 0..count {
            let end = read_end(&bytes, count, i);
            if end < prev || end > data_len {
                return Err(invalid("field offsets out of order"));
            }
            prev = end;
        }
        if prev != data_len {
            return Err(invalid("trailing field bytes"));
        }

        Ok(Self(bytes.into()))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        read_count(&self.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Raw bytes of field `i`; `None` when the field is null or out of range.
    #[must_use]
    pub fn field(&self, i: usize) -> Option<&[u8]> {
        let count = self.count();
        if i >= count {
            return None;
        }

        let start = if i == 0 {
            0
        } else {
            read_end(&self.0, count, i - 1)
        };
        let end = read_end(&self.0, count, i);

        (end > start).then(|| &self.0[start..end])
    }

    /// Iterate all fields in order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = Option<&[u8]>> + '_ {
        (0..self.count()).map(|i| self.field(i))
    }

    /// Stored byte representation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for field in self.fields() {
            match field {
                Some(bytes) => list.entry(&HexField(bytes)),
                None => list.entry(&format_args!("NULL")),
            };
        }
        list.finish()
    }
}

struct HexField<'a>(&'a [u8]);

impl fmt::Debug for HexField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

fn read_count(bytes: &[u8]) -> usize {
    let at = bytes.len() - COUNT_BYTES;
    usize::from(u16::from_le_bytes([bytes[at], bytes[at + 1]]))
}

fn read_end(bytes: &[u8], count: usize, i: usize) -> usize {
    let table = bytes.len() - COUNT_BYTES - count * OFFSET_BYTES;
    let at = table + i * OFFSET_BYTES;
    let raw = [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];

    u32::from_le_bytes(raw) as usize
}
