use crate::db::tuple::{Tuple, TupleDesc};
use std::{cmp::Ordering, ops::Bound};

///
/// Range
///
/// Key range evaluated under its own descriptor. The descriptor may be a
/// prefix of the map's key descriptor, in which case bounds only constrain
/// the leading fields.
///

#[derive(Clone, Debug)]
pub struct Range {
    start: Bound<Tuple>,
    stop: Bound<Tuple>,
    desc: TupleDesc,
}

impl Range {
    #[must_use]
    pub const fn new(start: Bound<Tuple>, stop: Bound<Tuple>, desc: TupleDesc) -> Self {
        Self { start, stop, desc }
    }

    /// `[start, stop]` under `desc`.
    #[must_use]
    pub const fn closed(start: Tuple, stop: Tuple, desc: TupleDesc) -> Self {
        Self::new(Bound::Included(start), Bound::Included(stop), desc)
    }

    /// Every key.
    #[must_use]
    pub const fn all(desc: TupleDesc) -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded, desc)
    }

    #[must_use]
    pub const fn start(&self) -> &Bound<Tuple> {
        &self.start
    }

    #[must_use]
    pub const fn stop(&self) -> &Bound<Tuple> {
        &self.stop
    }

    #[must_use]
    pub const fn desc(&self) -> &TupleDesc {
        &self.desc
    }

    /// Whether `key` orders before the start bound.
    #[must_use]
    pub fn before_start(&self, key: &Tuple) -> bool {
        match &self.start {
            Bound::Included(start) => self.desc.compare(key, start) == Ordering::Less,
            Bound::Excluded(start) => self.desc.compare(key, start) != Ordering::Greater,
            Bound::Unbounded => false,
        }
    }

    /// Whether `key` orders after the stop bound.
    #[must_use]
    pub fn after_stop(&self, key: &Tuple) -> bool {
        match &self.stop {
            Bound::Included(stop) => self.desc.compare(key, stop) == Ordering::Greater,
            Bound::Excluded(stop) => self.desc.compare(key, stop) != Ordering::Less,
            Bound::Unbounded => false,
        }
    }

    #[must_use]
    pub fn contains(&self, key: &Tuple) -> bool {
        !self.before_start(key) && !self.after_stop(key)
    }
}
