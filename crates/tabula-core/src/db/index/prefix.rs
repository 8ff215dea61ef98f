use crate::{
    db::{
        context::Context,
        map::{MapIter, MutableMap, MutableMapIter, OrderedMap, OrderedMapIter, Range},
        tuple::{Tuple, TupleDesc},
    },
    error::InternalError,
};

///
/// RangeIterator
///
/// Anything that can open an ordered scan over a key range. The returned
/// cursor may over-approximate the range; callers filter exactly.
///

pub trait RangeIterator {
    type Iter<'a>: MapIter
    where
        Self: 'a;

    fn iter_range<'a>(&'a self, ctx: &Context, range: &Range)
    -> Result<Self::Iter<'a>, InternalError>;
}

impl RangeIterator for MutableMap {
    type Iter<'a> = MutableMapIter<'a>;

    fn iter_range<'a>(
        &'a self,
        ctx: &Context,
        range: &Range,
    ) -> Result<Self::Iter<'a>, InternalError> {
        Self::iter_range(self, ctx, range)
    }
}

impl RangeIterator for OrderedMap {
    type Iter<'a> = OrderedMapIter<'a>;

    fn iter_range<'a>(
        &'a self,
        ctx: &Context,
        range: &Range,
    ) -> Result<Self::Iter<'a>, InternalError> {
        Self::iter_range(self, ctx, range)
    }
}

///
/// PrefixIter
///
/// Yields exactly the entries whose leading fields equal `prefix`
/// byte-for-byte. Null prefix fields match null key fields.
///

pub struct PrefixIter<'a, M: RangeIterator + 'a> {
    iter: M::Iter<'a>,
    prefix: Tuple,
}

impl<'a, M: RangeIterator + 'a> PrefixIter<'a, M> {
    /// Open a scan of `map` over the closed range `[prefix, prefix]` under `desc`.
    pub fn new(
        ctx: &Context,
        prefix: Tuple,
        desc: TupleDesc,
        map: &'a M,
    ) -> Result<Self, InternalError> {
        let range = Range::closed(prefix.clone(), prefix.clone(), desc);
        let iter = map.iter_range(ctx, &range)?;

        Ok(Self { iter, prefix })
    }

    fn matches(&self, key: &Tuple) -> bool {
        (0..self.prefix.count()).all(|i| self.prefix.field(i) == key.field(i))
    }
}

impl<'a, M: RangeIterator + 'a> MapIter for PrefixIter<'a, M> {
    fn next(&mut self, ctx: &Context) -> Result<Option<(Tuple, Tuple)>, InternalError> {
        while let Some((key, value)) = self.iter.next(ctx)? {
            if self.matches(&key) {
                return Ok(Some((key, value)));
            }
        }

        Ok(None)
    }
}
