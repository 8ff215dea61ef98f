use crate::db::tuple::TupleDesc;
use serde::{Deserialize, Serialize};

///
/// IndexProperties
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexProperties {
    pub is_unique: bool,
    pub is_user_defined: bool,
    pub comment: String,
}

///
/// Index
///
/// Secondary index definition.
///
/// Key layout is the declared columns followed by every primary-key column
/// not already declared (`all_tags`). The first `count()` fields are the
/// uniqueness prefix; the primary-key suffix keeps entries distinct.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Index {
    name: String,
    tags: Vec<u64>,
    all_tags: Vec<u64>,
    column_names: Vec<String>,
    key_desc: TupleDesc,
    props: IndexProperties,
}

impl Index {
    pub(super) const fn new(
        name: String,
        tags: Vec<u64>,
        all_tags: Vec<u64>,
        column_names: Vec<String>,
        key_desc: TupleDesc,
        props: IndexProperties,
    ) -> Self {
        Self {
            name,
            tags,
            all_tags,
            column_names,
            key_desc,
            props,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared column tags, in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[u64] {
        &self.tags
    }

    /// Full key layout: declared tags then the primary-key suffix.
    #[must_use]
    pub fn all_tags(&self) -> &[u64] {
        &self.all_tags
    }

    /// Number of declared columns.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub const fn key_desc(&self) -> &TupleDesc {
        &self.key_desc
    }

    /// Descriptor over the declared columns only.
    #[must_use]
    pub fn prefix_desc(&self) -> TupleDesc {
        self.key_desc.prefix_desc(self.count())
    }

    #[must_use]
    pub const fn props(&self) -> &IndexProperties {
        &self.props
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.props.is_unique
    }

    #[must_use]
    pub const fn is_user_defined(&self) -> bool {
        self.props.is_user_defined
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.props.comment
    }
}

///
/// IndexCollection
///

#[derive(Clone, Debug, Default)]
pub struct IndexCollection {
    indexes: Vec<Index>,
}

impl IndexCollection {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.indexes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Index> + '_ {
        self.indexes.iter()
    }

    #[must_use]
    pub fn get_by_name_case_insensitive(&self, name: &str) -> Option<&Index> {
        self.indexes
            .iter()
            .find(|index| index.name.eq_ignore_ascii_case(name))
    }

    /// Index whose declared columns equal `tags` in order.
    #[must_use]
    pub fn get_by_tags(&self, tags: &[u64]) -> Option<&Index> {
        self.indexes.iter().find(|index| index.tags == tags)
    }

    /// Index whose declared column names equal `names` in order,
    /// compared case-insensitively.
    #[must_use]
    pub fn get_by_column_names<S: AsRef<str>>(&self, names: &[S]) -> Option<&Index> {
        self.indexes.iter().find(|index| {
            index.column_names.len() == names.len()
                && index
                    .column_names
                    .iter()
                    .zip(names)
                    .all(|(have, want)| have.eq_ignore_ascii_case(want.as_ref()))
        })
    }

    pub(super) fn push(&mut self, index: Index) {
        self.indexes.push(index);
    }

    pub(super) fn remove(&mut self, name: &str) -> Option<Index> {
        let at = self
            .indexes
            .iter()
            .position(|index| index.name.eq_ignore_ascii_case(name))?;

        Some(self.indexes.remove(at))
    }
}
