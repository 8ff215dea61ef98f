//! Module: db
//! Responsibility: storage primitives, schemas, table snapshots, and index builds.
//! Does not own: observability state or option parsing.

pub mod context;
pub mod index;
pub mod map;
pub mod schema;
pub mod table;
pub mod tuple;
