//! Module: table
//! Responsibility: immutable table snapshots pairing a schema with row and index data.
//! Does not own: index construction or schema validation.
//! Boundary: every mutator returns a new `Table`; the receiver is never changed.

#[cfg(test)]
mod tests;

use crate::{
    db::{
        context::Context,
        index::IndexError,
        map::{MutableMap, OrderedMap},
        schema::Schema,
        tuple::{CodecError, TupleBuilder, TupleDesc},
    },
    error::InternalError,
    value::Value,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// StorageFormat
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StorageFormat {
    /// Older on-disk layout; index builds go through the legacy rebuild hook.
    Legacy,

    #[default]
    Ordered,
}

///
/// IndexData
///
/// Opaque handle to one ordered map of index or row data.
///

#[derive(Clone, Debug)]
pub struct IndexData {
    map: OrderedMap,
}

impl IndexData {
    #[must_use]
    pub const fn new(map: OrderedMap) -> Self {
        Self { map }
    }

    #[must_use]
    pub const fn map(&self) -> &OrderedMap {
        &self.map
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub const fn key_desc(&self) -> &TupleDesc {
        self.map.key_desc()
    }
}

///
/// Table
///
/// Snapshot of one table version. Cloning is cheap and shares all data.
/// Index data is keyed by the lower-cased index name.
///

#[derive(Clone, Debug)]
pub struct Table {
    format: StorageFormat,
    schema: Arc<Schema>,
    rows: IndexData,
    indexes: Arc<BTreeMap<String, IndexData>>,
}

impl Table {
    /// Wrap existing row data; its descriptors must match the schema.
    pub fn new(schema: Schema, rows: OrderedMap) -> Result<Self, InternalError> {
        if rows.key_desc() != &schema.key_desc() || rows.value_desc() != &schema.value_desc() {
            return Err(InternalError::table_unsupported(
                "row data layout does not match the schema",
            ));
        }

        Ok(Self {
            format: StorageFormat::default(),
            schema: Arc::new(schema),
            rows: IndexData::new(rows),
            indexes: Arc::default(),
        })
    }

    /// Table with no rows.
    #[must_use]
    pub fn empty(schema: Schema) -> Self {
        let rows = OrderedMap::empty(schema.key_desc(), schema.value_desc());

        Self {
            format: StorageFormat::default(),
            schema: Arc::new(schema),
            rows: IndexData::new(rows),
            indexes: Arc::default(),
        }
    }

    #[must_use]
    pub const fn with_format(mut self, format: StorageFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub const fn format(&self) -> StorageFormat {
        self.format
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Primary row data.
    #[must_use]
    pub const fn row_data(&self) -> &IndexData {
        &self.rows
    }

    /// Replace the schema, keeping row and index data as they are.
    #[must_use]
    pub fn update_schema(&self, schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            ..self.clone()
        }
    }

    /// Data stored for the index named `name` (case-insensitive).
    #[must_use]
    pub fn index_rows(&self, name: &str) -> Option<&IndexData> {
        self.indexes.get(&index_slot(name))
    }

    /// Names of every index with stored data, lower-cased.
    pub fn index_data_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.indexes.keys().map(String::as_str)
    }

    /// Store data for an index the schema defines.
    pub fn set_index_rows(&self, name: &str, data: IndexData) -> Result<Self, InternalError> {
        let Some(index) = self.schema.indexes().get_by_name_case_insensitive(name) else {
            return Err(IndexError::IndexNotFound {
                name: name.to_string(),
            }
            .into());
        };
        if data.key_desc() != index.key_desc() {
            return Err(InternalError::index_invariant(format!(
                "index data layout does not match index '{}'",
                index.name()
            )));
        }

        let mut indexes = (*self.indexes).clone();
        indexes.insert(index_slot(name), data);

        Ok(Self {
            indexes: Arc::new(indexes),
            ..self.clone()
        })
    }

    /// Drop stored data for `name`; a missing entry is not an error.
    #[must_use]
    pub fn delete_index_row_data(&self, name: &str) -> Self {
        let slot = index_slot(name);
        if !self.indexes.contains_key(&slot) {
            return self.clone();
        }

        let mut indexes = (*self.indexes).clone();
        indexes.remove(&slot);

        Self {
            indexes: Arc::new(indexes),
            ..self.clone()
        }
    }

    /// Upsert rows given as values in schema column order.
    ///
    /// Secondary index data is left as it was; rebuild indexes afterwards
    /// to bring them back in line with the rows.
    pub fn write_rows<R>(
        &self,
        ctx: &Context,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, InternalError>
    where
        R: AsRef<[Value]>,
    {
        let schema = &self.schema;
        let mut staging: MutableMap = self.rows.map().mutate();
        let mut key_builder = TupleBuilder::new(schema.key_desc());
        let mut value_builder = TupleBuilder::new(schema.value_desc());

        for row in rows {
            ctx.check()?;

            let row = row.as_ref();
            if row.len() != schema.all_cols().len() {
                return Err(CodecError::FieldCountMismatch {
                    expected: schema.all_cols().len(),
                    found: row.len(),
                }
                .into());
            }

            for (col, value) in schema.all_cols().iter().zip(row) {
                if let Some(at) = schema.pk_cols().tag_to_idx(col.tag) {
                    key_builder.put(at, value)?;
                } else if let Some(at) = schema.non_pk_cols().tag_to_idx(col.tag) {
                    value_builder.put(at, value)?;
                }
            }

            let key = key_builder.try_build()?;
            let value = value_builder.try_build()?;
            staging.put(key, value)?;
        }

        Ok(Self {
            rows: IndexData::new(staging.map()),
            ..self.clone()
        })
    }
}

fn index_slot(name: &str) -> String {
    name.to_ascii_lowercase()
}
