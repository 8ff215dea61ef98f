use crate::db::{
    schema::{Index, Schema},
    tuple::Tuple,
};
use derive_more::Deref;

///
/// OrdinalMapping
///
/// `mapping[to] == from`: index key field `to` is read from position `from`
/// of the row's concatenated [primary key ‖ value] field space.
///

#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub struct OrdinalMapping(Vec<usize>);

impl OrdinalMapping {
    #[must_use]
    pub fn map_ordinal(&self, to: usize) -> usize {
        self.0[to]
    }
}

/// Map every field of `index`'s key layout onto the row field space.
///
/// # Panics
/// Panics if the index names a tag the schema does not define; indexes are
/// only created through the schema, so this is a programming error.
#[must_use]
pub fn index_key_mapping(schema: &Schema, index: &Index) -> OrdinalMapping {
    let pk = schema.pk_cols();
    let non_pk = schema.non_pk_cols();

    let mapping = index
        .all_tags()
        .iter()
        .map(|tag| {
            pk.tag_to_idx(*tag).unwrap_or_else(|| {
                let at = non_pk
                    .tag_to_idx(*tag)
                    .expect("index column tags must belong to the table schema");
                pk.len() + at
            })
        })
        .collect();

    OrdinalMapping(mapping)
}

/// Raw field `from` of a row's [key ‖ value] field space.
pub(crate) fn row_field<'a>(
    key: &'a Tuple,
    value: &'a Tuple,
    pk_len: usize,
    from: usize,
) -> Option<&'a [u8]> {
    if from < pk_len {
        key.field(from)
    } else {
        value.field(from - pk_len)
    }
}
