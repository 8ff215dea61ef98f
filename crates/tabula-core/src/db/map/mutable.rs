use crate::{
    db::{
        context::Context,
        map::{MapIter, OrderedMap, Range},
        tuple::{Tuple, TupleDesc},
    },
    error::InternalError,
};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, btree_map},
    ops::Bound,
};

///
/// MapKey
/// Key wrapper ordering tuples by their map's key descriptor.
///

#[derive(Clone, Debug)]
struct MapKey {
    tuple: Tuple,
    desc: TupleDesc,
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MapKey {}

impl PartialOrd for MapKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MapKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.desc.compare(&self.tuple, &other.tuple)
    }
}

///
/// MutableMap
///
/// Exclusively owned staging structure for one new map version.
/// Writes land in key order; `map` finalizes into an immutable snapshot.
///

#[derive(Debug)]
pub struct MutableMap {
    key_desc: TupleDesc,
    value_desc: TupleDesc,
    entries: BTreeMap<MapKey, Tuple>,
}

impl MutableMap {
    #[must_use]
    pub const fn new(key_desc: TupleDesc, value_desc: TupleDesc) -> Self {
        Self {
            key_desc,
            value_desc,
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn key_desc(&self) -> &TupleDesc {
        &self.key_desc
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite one entry; tuple shapes must match the descriptors.
    pub fn put(&mut self, key: Tuple, value: Tuple) -> Result<(), InternalError> {
        if key.count() != self.key_desc.count() {
            return Err(InternalError::store_invariant(format!(
                "key has {} fields, map expects {}",
                key.count(),
                self.key_desc.count()
            )));
        }
        if value.count() != self.value_desc.count() {
            return Err(InternalError::store_invariant(format!(
                "value has {} fields, map expects {}",
                value.count(),
                self.value_desc.count()
            )));
        }

        self.insert_unchecked(key, value);

        Ok(())
    }

    pub(super) fn insert_unchecked(&mut self, key: Tuple, value: Tuple) {
        self.entries.insert(self.map_key(key), value);
    }

    /// Remove one entry, returning its value.
    pub fn delete(&mut self, key: &Tuple) -> Option<Tuple> {
        self.entries.remove(&self.map_key(key.clone()))
    }

    #[must_use]
    pub fn get(&self, key: &Tuple) -> Option<&Tuple> {
        self.entries.get(&self.map_key(key.clone()))
    }

    /// Ascending scan over `range` against the entries staged so far.
    pub fn iter_range(
        &self,
        ctx: &Context,
        range: &Range,
    ) -> Result<MutableMapIter<'_>, InternalError> {
        ctx.check()?;

        // Seek with the start bound truncated to the range's own field count;
        // remaining bound semantics are applied per entry.
        let lower = match range.start() {
            Bound::Included(start) | Bound::Excluded(start) => {
                let width = range.desc().count().min(start.count());
                let seek = Tuple::from_fields(start.fields().take(width));
                Bound::Included(self.map_key(seek))
            }
            Bound::Unbounded => Bound::Unbounded,
        };

        Ok(MutableMapIter {
            inner: self.entries.range((lower, Bound::Unbounded)),
            range: range.clone(),
            done: false,
        })
    }

    /// Finalize the staged entries into an immutable snapshot.
    #[must_use]
    pub fn map(self) -> OrderedMap {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, value)| (key.tuple, value))
            .collect();

        OrderedMap::from_sorted(self.key_desc, self.value_desc, entries)
    }

    fn map_key(&self, tuple: Tuple) -> MapKey {
        MapKey {
            tuple,
            desc: self.key_desc.clone(),
        }
    }
}

///
/// MutableMapIter
///

#[derive(Debug)]
pub struct MutableMapIter<'a> {
    inner: btree_map::Range<'a, MapKey, Tuple>,
    range: Range,
    done: bool,
}

impl MapIter for MutableMapIter<'_> {
    fn next(&mut self, ctx: &Context) -> Result<Option<(Tuple, Tuple)>, InternalError> {
        while !self.done {
            ctx.check()?;

            let Some((key, value)) = self.inner.next() else {
                self.done = true;
                break;
            };
            if self.range.before_start(&key.tuple) {
                continue;
            }
            if self.range.after_stop(&key.tuple) {
                self.done = true;
                break;
            }

            return Ok(Some((key.tuple.clone(), value.clone())));
        }

        Ok(None)
    }
}
