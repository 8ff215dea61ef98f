use crate::db::tuple::{FieldType, TupleDesc};
use std::collections::HashMap;
use tabula_primitives::Encoding;

///
/// Column
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Column {
    pub name: String,
    pub tag: u64,
    pub encoding: Encoding,
    pub nullable: bool,
    pub primary_key: bool,
}

impl Column {
    /// A non-null, non-key column.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: u64, encoding: Encoding) -> Self {
        Self {
            name: name.into(),
            tag,
            encoding,
            nullable: false,
            primary_key: false,
        }
    }

    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        FieldType::new(self.encoding, self.nullable)
    }
}

///
/// ColumnCollection
///
/// Ordered column set with tag and case-insensitive name lookup.
///

#[derive(Clone, Debug, Default)]
pub struct ColumnCollection {
    columns: Vec<Column>,
    tag_to_idx: HashMap<u64, usize>,
    name_to_idx: HashMap<String, usize>,
}

impl ColumnCollection {
    pub(super) fn new(columns: Vec<Column>) -> Self {
        let tag_to_idx = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.tag, i))
            .collect();
        let name_to_idx = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.name.to_ascii_lowercase(), i))
            .collect();

        Self {
            columns,
            tag_to_idx,
            name_to_idx,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.iter()
    }

    pub fn tags(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.columns.iter().map(|col| col.tag)
    }

    /// Position of `tag` within this collection.
    #[must_use]
    pub fn tag_to_idx(&self, tag: u64) -> Option<usize> {
        self.tag_to_idx.get(&tag).copied()
    }

    #[must_use]
    pub fn by_tag(&self, tag: u64) -> Option<&Column> {
        self.tag_to_idx(tag).map(|i| &self.columns[i])
    }

    #[must_use]
    pub fn by_name_case_insensitive(&self, name: &str) -> Option<&Column> {
        self.name_to_idx
            .get(&name.to_ascii_lowercase())
            .map(|i| &self.columns[*i])
    }

    /// Tuple layout of these columns in collection order.
    #[must_use]
    pub fn desc(&self) -> TupleDesc {
        TupleDesc::new(
            self.columns
                .iter()
                .map(Column::field_type)
                .collect::<Vec<_>>(),
        )
    }
}
