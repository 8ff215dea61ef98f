use crate::{
    db::{
        context::Context,
        index::{IndexError, prefix::PrefixIter},
        map::MapIter,
        table::Table,
        tuple::{Tuple, TupleBuilder},
    },
    error::InternalError,
    value::Value,
};

/// Index keys whose leading declared columns equal `prefix`, in index order.
///
/// `Value::Null` in the prefix matches null key fields.
pub fn index_prefix_entries(
    ctx: &Context,
    table: &Table,
    index_name: &str,
    prefix: &[Value],
) -> Result<Vec<Tuple>, InternalError> {
    let not_found = || IndexError::IndexNotFound {
        name: index_name.to_string(),
    };

    let index = table
        .schema()
        .indexes()
        .get_by_name_case_insensitive(index_name)
        .ok_or_else(not_found)?;
    if prefix.len() > index.count() {
        return Err(IndexError::PrefixTooLong {
            index: index.name().to_string(),
            len: prefix.len(),
            max: index.count(),
        }
        .into());
    }
    let data = table.index_rows(index.name()).ok_or_else(not_found)?;

    let desc = index.key_desc().prefix_desc(prefix.len());
    let mut builder = TupleBuilder::new(desc.clone());
    for (i, value) in prefix.iter().enumerate() {
        builder.put(i, value)?;
    }

    let mut iter = PrefixIter::new(ctx, builder.build(), desc, data.map())?;
    let mut keys = Vec::new();
    while let Some((key, _)) = iter.next(ctx)? {
        keys.push(key);
    }

    Ok(keys)
}
