//! Module: schema
//! Responsibility: column layout, primary-key split, and secondary index definitions.
//! Does not own: index data or the build pipeline.
//! Boundary: index construction reads `Schema`/`Index`; only `add_index_by_col_names`
//! and `remove_index` mutate the index collection.

mod column;
mod index;
mod name;


pub use column::{Column, ColumnCollection};
pub use index::{Index, IndexCollection, IndexProperties};
pub use name::{INDEX_NAME_PATTERN, MAX_INDEX_NAME_LEN, is_valid_index_name};

use crate::{
    db::{index::IndexError, tuple::TupleDesc},
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use std::collections::HashSet;
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("schema declares no primary key column")]
    NoPrimaryKey,

    #[error("column tag {tag} is used more than once")]
    DuplicateTag { tag: u64 },

    #[error("column name `{name}` is used more than once")]
    DuplicateName { name: String },

    #[error("primary key column `{name}` cannot be nullable")]
    NullablePrimaryKey { name: String },
}

impl From<SchemaError> for InternalError {
    fn from(err: SchemaError) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Schema, err.to_string())
    }
}

///
/// Schema
///
/// Table schema: every column in declaration order, its primary-key and
/// non-key projections, and the secondary indexes defined over them.
///
/// Row keys are the primary-key columns in order; row values are the
/// non-key columns in order.
///

#[derive(Clone, Debug)]
pub struct Schema {
    all: ColumnCollection,
    pk: ColumnCollection,
    non_pk: ColumnCollection,
    indexes: IndexCollection,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Result<Self, SchemaError> {
        let mut tags = HashSet::new();
        let mut names = HashSet::new();

        for col in &columns {
            if !tags.insert(col.tag) {
                return Err(SchemaError::DuplicateTag { tag: col.tag });
            }
            if !names.insert(col.name.to_ascii_lowercase()) {
                return Err(SchemaError::DuplicateName {
                    name: col.name.clone(),
                });
            }
            if col.primary_key && col.nullable {
                return Err(SchemaError::NullablePrimaryKey {
                    name: col.name.clone(),
                });
            }
        }

        let (pk, non_pk): (Vec<_>, Vec<_>) =
            columns.iter().cloned().partition(|col| col.primary_key);
        if pk.is_empty() {
            return Err(SchemaError::NoPrimaryKey);
        }

        Ok(Self {
            all: ColumnCollection::new(columns),
            pk: ColumnCollection::new(pk),
            non_pk: ColumnCollection::new(non_pk),
            indexes: IndexCollection::default(),
        })
    }

    #[must_use]
    pub const fn all_cols(&self) -> &ColumnCollection {
        &self.all
    }

    #[must_use]
    pub const fn pk_cols(&self) -> &ColumnCollection {
        &self.pk
    }

    #[must_use]
    pub const fn non_pk_cols(&self) -> &ColumnCollection {
        &self.non_pk
    }

    #[must_use]
    pub const fn indexes(&self) -> &IndexCollection {
        &self.indexes
    }

    /// Row key layout.
    #[must_use]
    pub fn key_desc(&self) -> TupleDesc {
        self.pk.desc()
    }

    /// Row value layout.
    #[must_use]
    pub fn value_desc(&self) -> TupleDesc {
        self.non_pk.desc()
    }

    /// Define a secondary index over `columns`, resolved case-insensitively.
    ///
    /// Rejects invalid or taken names, unknown or repeated columns, and a
    /// column list already covered by another index.
    pub fn add_index_by_col_names<S: AsRef<str>>(
        &mut self,
        name: &str,
        columns: &[S],
        props: IndexProperties,
        max_columns: usize,
    ) -> Result<Index, IndexError> {
        // Phase 1: name.
        if !is_valid_index_name(name) {
            return Err(IndexError::InvalidIndexName {
                name: name.to_string(),
            });
        }
        if self.indexes.get_by_name_case_insensitive(name).is_some() {
            return Err(IndexError::IndexNameTaken {
                name: name.to_string(),
            });
        }

        // Phase 2: resolve declared columns.
        if columns.is_empty() {
            return Err(IndexError::NoColumns);
        }
        if columns.len() > max_columns {
            return Err(IndexError::TooManyColumns {
                len: columns.len(),
                max: max_columns,
            });
        }

        let mut tags = Vec::with_capacity(columns.len());
        let mut column_names = Vec::with_capacity(columns.len());
        for requested in columns {
            let requested = requested.as_ref();
            let col = self.all.by_name_case_insensitive(requested).ok_or_else(|| {
                IndexError::ColumnNotFound {
                    column: requested.to_string(),
                }
            })?;
            if tags.contains(&col.tag) {
                return Err(IndexError::RepeatedColumn {
                    column: col.name.clone(),
                });
            }
            tags.push(col.tag);
            column_names.push(col.name.clone());
        }

        if let Some(existing) = self.indexes.get_by_tags(&tags) {
            return Err(IndexError::DuplicateColumns {
                existing: existing.name().to_string(),
                columns: column_names.join(","),
            });
        }

        // Phase 3: key layout is declared columns plus the remaining pk suffix.
        let mut all_tags = tags.clone();
        all_tags.extend(self.pk.tags().filter(|tag| !tags.contains(tag)));

        let key_desc = TupleDesc::new(
            all_tags
                .iter()
                .filter_map(|tag| self.all.by_tag(*tag))
                .map(Column::field_type)
                .collect::<Vec<_>>(),
        );

        let index = Index::new(
            name.to_string(),
            tags,
            all_tags,
            column_names,
            key_desc,
            props,
        );
        self.indexes.push(index.clone());

        Ok(index)
    }

    /// Drop the index named `name` (case-insensitive).
    pub fn remove_index(&mut self, name: &str) -> Result<Index, IndexError> {
        self.indexes
            .remove(name)
            .ok_or_else(|| IndexError::IndexNotFound {
                name: name.to_string(),
            })
    }
}
