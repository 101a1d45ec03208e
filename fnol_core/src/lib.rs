#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Field extraction, validation and routing for First Notice of Loss documents.
//!
//! ```text
//! raw text -> FieldExtractor -> StructuredFields -> { missing_fields, RoutingEngine }
//! ```

pub mod error;
pub mod extraction;
pub mod fields;
pub mod patterns;
pub mod report;
pub mod routing;
pub mod validation;

pub use error::{ExtractionError, Result};
pub use extraction::FieldExtractor;
pub use fields::{FieldName, StructuredFields};
pub use patterns::{BuildError, PatternDef, PatternKey, PatternLibrary, default_patterns};
pub use report::{ClaimPipeline, ClaimReport, process_text};
pub use routing::{FAST_TRACK_THRESHOLD, Route, RoutingDecision, RoutingEngine};
pub use validation::{MANDATORY_FIELDS, MandatoryField, all_mandatory_present, missing_fields};

/// Extract fields from raw text with the built-in patterns.
///
/// # Errors
/// Returns an error if a currency field holds malformed text.
pub fn extract(text: &str) -> Result<StructuredFields> {
    FieldExtractor::with_defaults().extract(text)
}

/// Route extracted fields with the built-in fraud-keyword pattern.
#[must_use]
pub fn route(fields: &StructuredFields) -> RoutingDecision {
    RoutingEngine::default().route(fields)
}
