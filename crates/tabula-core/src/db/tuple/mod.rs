//! Module: tuple
//! Responsibility: raw field tuples, their descriptors, and the reusable builder.
//! Does not own: map ordering or schema column resolution.
//! Boundary: maps, tables, and index builders exchange data only as `Tuple`s.

mod builder;
pub mod codec;
mod desc;
mod tuple;


pub use builder::TupleBuilder;
pub use codec::CodecError;
pub use desc::{FieldType, TupleDesc};
pub use tuple::{MAX_TUPLE_FIELDS, Tuple};
