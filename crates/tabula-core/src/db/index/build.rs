use crate::{
    db::{
        context::Context,
        index::mapping::{index_key_mapping, row_field},
        map::{MapIter, MutableMap, OrderedMap},
        schema::{Index, Schema},
        table::IndexData,
        tuple::{Tuple, TupleBuilder, TupleDesc},
    },
    error::InternalError,
    obs::sink::BuildSpan,
};

/// Build a non-unique secondary index from a full scan of `primary`.
///
/// Every row yields exactly one entry: the mapped key fields with an
/// empty value. Null fields are copied through as null.
pub fn build_secondary_index(
    ctx: &Context,
    schema: &Schema,
    index: &Index,
    primary: &OrderedMap,
) -> Result<IndexData, InternalError> {
    let mut span = BuildSpan::new(index.name(), false);

    let mapping = index_key_mapping(schema, index);
    let pk_len = schema.pk_cols().len();
    let mut key_builder = TupleBuilder::new(index.key_desc().clone());
    let mut secondary = MutableMap::new(index.key_desc().clone(), TupleDesc::empty());
    let empty = Tuple::empty();

    let mut rows = primary.iter_all(ctx)?;
    while let Some((key, value)) = rows.next(ctx)? {
        span.row_scanned();

        for (to, from) in mapping.iter().copied().enumerate() {
            key_builder.put_raw(to, row_field(&key, &value, pk_len, from));
        }
        secondary.put(key_builder.build(), empty.clone())?;
    }

    let map = secondary.map();
    span.finish(map.len());

    Ok(IndexData::new(map))
}
