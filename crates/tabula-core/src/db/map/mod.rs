//! Module: map
//! Responsibility: immutable ordered tuple maps, their staging copies, and range scans.
//! Does not own: physical persistence or structural sharing between versions.
//! Boundary: the only storage surface index builders consume.

mod mutable;
mod ordered;
mod range;


use crate::{
    db::{context::Context, tuple::Tuple},
    error::InternalError,
};

pub use mutable::{MutableMap, MutableMapIter};
pub use ordered::{OrderedMap, OrderedMapIter};
pub use range::Range;

///
/// MapIter
///
/// Pull-based cursor over (key, value) pairs. `Ok(None)` is end of range.
///

pub trait MapIter {
    fn next(&mut self, ctx: &Context) -> Result<Option<(Tuple, Tuple)>, InternalError>;
}
