//! Claim routing rules.
//!
//! Rules are evaluated in priority order and the first that applies decides
//! the route. No state is kept between calls.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::fields::StructuredFields;
use crate::patterns::{PatternKey, PatternLibrary};
use crate::validation::all_mandatory_present;

/// Estimated damage must be strictly below this for fast-track (25000.00).
pub const FAST_TRACK_THRESHOLD: Decimal = Decimal::from_parts(2_500_000, 0, 0, false, 2);

/// Claim types containing this (case-insensitively) go to a specialist.
pub const INJURY_CLAIM_TYPE: &str = "injury";

/// Downstream queue for a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[serde(rename = "Fast-track")]
    FastTrack,
    #[serde(rename = "Manual review")]
    ManualReview,
    #[serde(rename = "Investigation Flag")]
    InvestigationFlag,
    #[serde(rename = "Specialist Queue")]
    SpecialistQueue,
}

impl Route {
    /// Returns the queue name used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FastTrack => "Fast-track",
            Self::ManualReview => "Manual review",
            Self::InvestigationFlag => "Investigation Flag",
            Self::SpecialistQueue => "Specialist Queue",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route chosen for a claim together with a one-sentence reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingDecision {
    route: Route,
    reasoning: &'static str,
}

impl RoutingDecision {
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub const fn reasoning(&self) -> &'static str {
        self.reasoning
    }
}

struct Rule {
    name: &'static str,
    route: Route,
    reasoning: &'static str,
    applies: fn(&RoutingEngine, &StructuredFields) -> bool,
}

const RULES: [Rule; 4] = [
    Rule {
        name: "missing_mandatory_fields",
        route: Route::ManualReview,
        reasoning: "Missing mandatory fields detected",
        applies: |_, fields| !all_mandatory_present(fields),
    },
    Rule {
        name: "fraud_keywords",
        route: Route::InvestigationFlag,
        reasoning: "Description contains fraud-related keywords",
        applies: |engine, fields| {
            fields
                .description
                .as_deref()
                .is_some_and(|description| engine.fraud_keywords.is_match(description))
        },
    },
    Rule {
        name: "injury_claim",
        route: Route::SpecialistQueue,
        reasoning: "Claim type is injury - requires specialist review",
        applies: |_, fields| {
            fields
                .claim_type
                .as_deref()
                .is_some_and(|claim_type| claim_type.to_lowercase().contains(INJURY_CLAIM_TYPE))
        },
    },
    Rule {
        name: "below_fast_track_threshold",
        route: Route::FastTrack,
        reasoning: "Estimated damage below $25,000 threshold and all mandatory fields present",
        applies: |_, fields| {
            fields
                .estimated_damage
                .is_some_and(|damage| damage < FAST_TRACK_THRESHOLD)
        },
    },
];

const FALLBACK: RoutingDecision = RoutingDecision {
    route: Route::ManualReview,
    reasoning: "Estimated damage exceeds fast-track threshold - requires manual review",
};

/// Ordered rule chain that selects a route for extracted fields.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    fraud_keywords: Regex,
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::new(PatternLibrary::builtin())
    }
}

impl RoutingEngine {
    /// Create an engine using the library's fraud-keyword pattern.
    #[must_use]
    pub fn new(library: &PatternLibrary) -> Self {
        Self {
            fraud_keywords: library.get(PatternKey::FraudKeywords).clone(),
        }
    }

    /// Select a route. The first applicable rule wins; when none applies the
    /// claim goes to manual review.
    #[must_use]
    pub fn route(&self, fields: &StructuredFields) -> RoutingDecision {
        let decision = RULES
            .iter()
            .find(|rule| (rule.applies)(self, fields))
            .map_or(FALLBACK, |rule| {
                tracing::debug!(rule = rule.name, "Routing rule applied");
                RoutingDecision {
                    route: rule.route,
                    reasoning: rule.reasoning,
                }
            });

        info!(
            route = %decision.route,
            policy_number = ?fields.policy_number,
            "Claim routed"
        );
        decision
    }
}
