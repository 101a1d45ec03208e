//! End-to-end claim processing: extraction, validation and routing.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extraction::FieldExtractor;
use crate::fields::{FieldName, StructuredFields};
use crate::patterns::PatternLibrary;
use crate::routing::{Route, RoutingEngine};
use crate::validation::missing_fields;

/// Result of processing one FNOL document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReport {
    pub extracted_fields: StructuredFields,
    pub missing_fields: Vec<FieldName>,
    pub recommended_route: Route,
    pub reasoning: String,
}

/// Extractor and router sharing one pattern library.
#[derive(Debug, Clone)]
pub struct ClaimPipeline {
    extractor: FieldExtractor,
    router: RoutingEngine,
}

impl Default for ClaimPipeline {
    fn default() -> Self {
        Self::new(PatternLibrary::builtin().clone())
    }
}

impl ClaimPipeline {
    #[must_use]
    pub fn new(library: PatternLibrary) -> Self {
        let router = RoutingEngine::new(&library);
        Self {
            extractor: FieldExtractor::new(library),
            router,
        }
    }

    /// Process raw document text into a report.
    ///
    /// # Errors
    /// Returns an error if a currency field holds malformed text.
    pub fn process(&self, text: &str) -> Result<ClaimReport> {
        let fields = self.extractor.extract(text)?;
        Ok(self.report(fields))
    }

    /// Validate and route already extracted fields.
    #[must_use]
    pub fn report(&self, fields: StructuredFields) -> ClaimReport {
        let missing = missing_fields(&fields);
        let decision = self.router.route(&fields);

        ClaimReport {
            extracted_fields: fields,
            missing_fields: missing,
            recommended_route: decision.route(),
            reasoning: decision.reasoning().to_string(),
        }
    }
}

/// Process raw text with the built-in patterns.
///
/// # Errors
/// Returns an error if a currency field holds malformed text.
pub fn process_text(text: &str) -> Result<ClaimReport> {
    ClaimPipeline::default().process(text)
}
