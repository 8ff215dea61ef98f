use crate::db::tuple::{Tuple, codec};
use std::{cmp::Ordering, sync::Arc};
use tabula_primitives::Encoding;

///
/// FieldType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldType {
    pub encoding: Encoding,
    pub nullable: bool,
}

impl FieldType {
    #[must_use]
    pub const fn new(encoding: Encoding, nullable: bool) -> Self {
        Self { encoding, nullable }
    }
}

///
/// TupleDesc
///
/// Ordered field layout for a family of tuples.
///
/// Comparison walks the descriptor's own field count only, so a prefix
/// descriptor orders tuples by their leading fields. Within one field a
/// missing field sorts before null, and null sorts before any value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TupleDesc {
    types: Arc<[FieldType]>,
}

impl TupleDesc {
    #[must_use]
    pub fn new(types: impl Into<Vec<FieldType>>) -> Self {
        Self {
            types: types.into().into(),
        }
    }

    /// Descriptor for the zero-field value tuple of secondary indexes.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn types(&self) -> &[FieldType] {
        &self.types
    }

    #[must_use]
    pub fn field_type(&self, i: usize) -> FieldType {
        self.types[i]
    }

    /// Leading `n` fields of this descriptor.
    #[must_use]
    pub fn prefix_desc(&self, n: usize) -> Self {
        debug_assert!(n <= self.count(), "prefix of {n} exceeds {}", self.count());
        let n = n.min(self.count());

        Self::new(self.types[..n].to_vec())
    }

    /// Order two tuples over this descriptor's fields.
    #[must_use]
    pub fn compare(&self, left: &Tuple, right: &Tuple) -> Ordering {
        for i in 0..self.count() {
            let ord = field_slot(left, i).cmp(&field_slot(right, i));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        Ordering::Equal
    }

    /// Human-readable rendering of one field.
    #[must_use]
    pub fn format_value(&self, i: usize, field: Option<&[u8]>) -> String {
        codec::format_field(self.types[i].encoding, field)
    }

    /// Comma-separated rendering of a tuple, e.g. `[1,x]`.
    #[must_use]
    pub fn format(&self, tuple: &Tuple) -> String {
        let values: Vec<String> = (0..self.count())
            .map(|i| self.format_value(i, tuple.field(i)))
            .collect();

        format!("[{}]", values.join(","))
    }
}

// (present, field): absent < null < value, values by raw bytes.
fn field_slot(tuple: &Tuple, i: usize) -> (bool, Option<&[u8]>) {
    (i < tuple.count(), tuple.field(i))
}
