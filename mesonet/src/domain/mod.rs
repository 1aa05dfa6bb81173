//! Domain types for Mesonet observations.
//!
//! The field vocabulary, its human-readable aliases, and station
//! identifiers. All types validate at construction time, so code that
//! receives them can trust their validity.

mod alias;
mod field;
mod station;

pub use alias::{alias_name, native_name};
pub use field::{FieldName, InvalidField};
pub use station::{InvalidStationId, StationId};
