use crate::{
    db::{
        context::Context,
        map::{MapIter, MutableMap, Range},
        tuple::{Tuple, TupleDesc},
    },
    error::InternalError,
};
use std::sync::Arc;

///
/// OrderedMap
///
/// Immutable snapshot of key/value tuples sorted by the key descriptor.
/// Clones share storage; nothing mutates a snapshot once built. New
/// versions are produced through `mutate` and `MutableMap::map`.
///

#[derive(Clone, Debug)]
pub struct OrderedMap {
    key_desc: TupleDesc,
    value_desc: TupleDesc,
    entries: Arc<[(Tuple, Tuple)]>,
}

impl OrderedMap {
    #[must_use]
    pub fn empty(key_desc: TupleDesc, value_desc: TupleDesc) -> Self {
        Self::from_sorted(key_desc, value_desc, Vec::new())
    }

    pub(super) fn from_sorted(
        key_desc: TupleDesc,
        value_desc: TupleDesc,
        entries: Vec<(Tuple, Tuple)>,
    ) -> Self {
        Self {
            key_desc,
            value_desc,
            entries: entries.into(),
        }
    }

    #[must_use]
    pub const fn key_desc(&self) -> &TupleDesc {
        &self.key_desc
    }

    #[must_use]
    pub const fn value_desc(&self) -> &TupleDesc {
        &self.value_desc
    }

    #[must_use]
    pub const fn descriptors(&self) -> (&TupleDesc, &TupleDesc) {
        (&self.key_desc, &self.value_desc)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &Tuple) -> Option<&Tuple> {
        self.entries
            .binary_search_by(|(probe, _)| self.key_desc.compare(probe, key))
            .ok()
            .map(|at| &self.entries[at].1)
    }

    #[must_use]
    pub fn contains(&self, key: &Tuple) -> bool {
        self.get(key).is_some()
    }

    /// Keys in map order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Tuple> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Full ascending scan.
    pub fn iter_all(&self, ctx: &Context) -> Result<OrderedMapIter<'_>, InternalError> {
        ctx.check()?;

        Ok(OrderedMapIter {
            entries: &self.entries,
        })
    }

    /// Ascending scan over `range`.
    pub fn iter_range(
        &self,
        ctx: &Context,
        range: &Range,
    ) -> Result<OrderedMapIter<'_>, InternalError> {
        ctx.check()?;

        let start = self
            .entries
            .partition_point(|(key, _)| range.before_start(key));
        let stop = self
            .entries
            .partition_point(|(key, _)| !range.after_stop(key))
            .max(start);

        Ok(OrderedMapIter {
            entries: &self.entries[start..stop],
        })
    }

    /// Open a staging copy seeded with this snapshot's entries.
    #[must_use]
    pub fn mutate(&self) -> MutableMap {
        let mut staging = MutableMap::new(self.key_desc.clone(), self.value_desc.clone());
        for (key, value) in self.entries.iter() {
            staging.insert_unchecked(key.clone(), value.clone());
        }

        staging
    }
}

///
/// OrderedMapIter
///

#[derive(Debug)]
pub struct OrderedMapIter<'a> {
    entries: &'a [(Tuple, Tuple)],
}

impl MapIter for OrderedMapIter<'_> {
    fn next(&mut self, ctx: &Context) -> Result<Option<(Tuple, Tuple)>, InternalError> {
        ctx.check()?;

        let Some(((key, value), rest)) = self.entries.split_first() else {
            return Ok(None);
        };
        self.entries = rest;

        Ok(Some((key.clone(), value.clone())))
    }
}
