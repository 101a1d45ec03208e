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

//! State fraud-penalty reference table.
//!
//! The table is loaded once at startup and only read afterwards. A load
//! failure is logged and leaves the table empty, so lookups report "not
//! found" instead of failing.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Table shipped with the binary.
pub const BUNDLED_PENALTIES: &str = include_str!("../data/fraud-penalties.json");

/// Fraud warning and penalty summary for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateFraudPenalty {
    pub state: String,
    pub state_code: String,
    pub penalty_description: String,
    #[serde(default)]
    pub has_criminal_penalty: bool,
    #[serde(default)]
    pub has_civil_penalty: bool,
}

/// Read-only lookup of penalties by two-letter state code.
#[derive(Debug, Clone, Default)]
pub struct FraudPenaltyTable {
    by_code: HashMap<String, StateFraudPenalty>,
}

impl FraudPenaltyTable {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table keyed by upper-cased state code. A later entry replaces
    /// an earlier one with the same code.
    #[must_use]
    pub fn from_penalties(penalties: Vec<StateFraudPenalty>) -> Self {
        let by_code = penalties
            .into_iter()
            .map(|penalty| (penalty.state_code.to_uppercase(), penalty))
            .collect();
        Self { by_code }
    }

    /// Parse a JSON array of penalties.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed.
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let penalties: Vec<StateFraudPenalty> =
            serde_json::from_str(json).context("Invalid fraud penalty data")?;
        Ok(Self::from_penalties(penalties))
    }

    /// Read and parse the table at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn try_load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load from `path`, or from the bundled table when `path` is `None`.
    ///
    /// Never fails: on error a warning is logged and an empty table returned.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => Self::try_load(path),
            None => Self::parse(BUNDLED_PENALTIES),
        };

        match result {
            Ok(table) => {
                info!("Loaded fraud penalties for {} states", table.len());
                table
            }
            Err(e) => {
                warn!("Could not load fraud penalties data: {e:#}");
                Self::empty()
            }
        }
    }

    /// Penalty for a state code, case-insensitively.
    #[must_use]
    pub fn get(&self, state_code: &str) -> Option<&StateFraudPenalty> {
        if state_code.is_empty() {
            return None;
        }
        self.by_code.get(&state_code.to_uppercase())
    }

    /// All penalties ordered by state code.
    #[must_use]
    pub fn all(&self) -> Vec<&StateFraudPenalty> {
        let mut penalties: Vec<_> = self.by_code.values().collect();
        penalties.sort_by(|a, b| a.state_code.cmp(&b.state_code));
        penalties
    }

    #[must_use]
    pub fn has_criminal_penalty(&self, state_code: &str) -> bool {
        self.get(state_code)
            .is_some_and(|penalty| penalty.has_criminal_penalty)
    }

    #[must_use]
    pub fn has_civil_penalty(&self, state_code: &str) -> bool {
        self.get(state_code)
            .is_some_and(|penalty| penalty.has_civil_penalty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
