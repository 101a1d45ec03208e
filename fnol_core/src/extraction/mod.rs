//! Field extraction from raw FNOL text.
//!
//! The engine applies the pattern library to the full document, takes the
//! first match of each pattern, and coerces the captured text to the field's
//! type.

pub mod engine;
pub mod parse;

pub use engine::FieldExtractor;
