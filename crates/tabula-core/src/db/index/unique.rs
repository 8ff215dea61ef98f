use crate::{
    db::{
        context::Context,
        index::{
            mapping::{index_key_mapping, row_field},
            prefix::PrefixIter,
        },
        map::{MapIter, MutableMap, OrderedMap},
        schema::{Index, Schema},
        table::IndexData,
        tuple::{Tuple, TupleBuilder, TupleDesc},
    },
    error::InternalError,
    obs::sink::BuildSpan,
};

/// Build a unique secondary index, reporting prefix collisions to `on_duplicate`.
///
/// Rows are processed in primary-key order. Before each insert the staged
/// entries are probed for one sharing the declared-column prefix; on a hit
/// `on_duplicate(existing_key, new_key)` runs, and an error from it aborts
/// the build. When it returns `Ok`, the row is inserted anyway.
///
/// A row with any null declared field never collides.
pub fn build_unique_index<F>(
    ctx: &Context,
    schema: &Schema,
    index: &Index,
    primary: &OrderedMap,
    mut on_duplicate: F,
) -> Result<IndexData, InternalError>
where
    F: FnMut(&Tuple, &Tuple) -> Result<(), InternalError>,
{
    let mut span = BuildSpan::new(index.name(), true);

    let mapping = index_key_mapping(schema, index);
    let pk_len = schema.pk_cols().len();
    let prefix_desc = index.prefix_desc();
    let prefix_len = prefix_desc.count();

    let mut key_builder = TupleBuilder::new(index.key_desc().clone());
    let mut prefix_builder = TupleBuilder::new(prefix_desc.clone());
    let mut secondary = MutableMap::new(index.key_desc().clone(), TupleDesc::empty());
    let empty = Tuple::empty();

    let mut rows = primary.iter_all(ctx)?;
    while let Some((key, value)) = rows.next(ctx)? {
        span.row_scanned();

        // Phase 1: assemble the index key and its declared-column prefix.
        let mut has_null = false;
        for (to, from) in mapping.iter().copied().enumerate() {
            let field = row_field(&key, &value, pk_len, from);
            key_builder.put_raw(to, field);

            if to < prefix_len {
                match field {
                    Some(bytes) => prefix_builder.put_raw(to, Some(bytes)),
                    None => has_null = true,
                }
            }
        }
        let index_key = key_builder.build();
        let prefix = prefix_builder.build();

        // Phase 2: probe the entries staged so far.
        if !has_null {
            let existing = {
                let mut probe = PrefixIter::new(ctx, prefix, prefix_desc.clone(), &secondary)?;
                probe.next(ctx)?.map(|(existing, _)| existing)
            };
            if let Some(existing) = existing {
                span.unique_violation();
                on_duplicate(&existing, &index_key)?;
            }
        }

        // Phase 3: stage the entry.
        secondary.put(index_key, empty.clone())?;
    }

    let map = secondary.map();
    span.finish(map.len());

    Ok(IndexData::new(map))
}
