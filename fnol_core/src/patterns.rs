//! Configurable extraction patterns for FNOL documents.
//!
//! Each pattern is plain data: a [`PatternKey`] naming what it locates and a
//! case-insensitive regex whose first capture group holds the value. Patterns
//! can be replaced from configuration without touching the extraction logic.
//!
//! The regex engine has no look-around, so "capture up to the next label" is
//! written as a lazy capture followed by a non-capturing terminator group.
//! Only the capture groups are read, so consuming the terminator is harmless.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// What a pattern locates in the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum PatternKey {
    PolicyNumber = 0,
    PolicyholderName = 1,
    /// Two capture groups: period start and period end.
    EffectivePeriod = 2,
    IncidentDate = 3,
    IncidentTime = 4,
    Location = 5,
    Description = 6,
    ClaimantName = 7,
    ContactDetails = 8,
    AssetType = 9,
    AssetId = 10,
    EstimatedDamage = 11,
    ClaimType = 12,
    InitialEstimate = 13,
    Attachments = 14,
    /// Whole-word fraud indicators; no capture group is read.
    FraudKeywords = 15,
}

impl PatternKey {
    /// Number of pattern keys.
    pub const COUNT: usize = 16;

    /// All keys in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::PolicyNumber,
        Self::PolicyholderName,
        Self::EffectivePeriod,
        Self::IncidentDate,
        Self::IncidentTime,
        Self::Location,
        Self::Description,
        Self::ClaimantName,
        Self::ContactDetails,
        Self::AssetType,
        Self::AssetId,
        Self::EstimatedDamage,
        Self::ClaimType,
        Self::InitialEstimate,
        Self::Attachments,
        Self::FraudKeywords,
    ];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PolicyNumber => "policyNumber",
            Self::PolicyholderName => "policyholderName",
            Self::EffectivePeriod => "effectivePeriod",
            Self::IncidentDate => "incidentDate",
            Self::IncidentTime => "incidentTime",
            Self::Location => "location",
            Self::Description => "description",
            Self::ClaimantName => "claimantName",
            Self::ContactDetails => "contactDetails",
            Self::AssetType => "assetType",
            Self::AssetId => "assetId",
            Self::EstimatedDamage => "estimatedDamage",
            Self::ClaimType => "claimType",
            Self::InitialEstimate => "initialEstimate",
            Self::Attachments => "attachments",
            Self::FraudKeywords => "fraudKeywords",
        }
    }

    /// Capture groups the extractor reads from a match of this pattern.
    #[must_use]
    pub const fn required_groups(&self) -> usize {
        match self {
            Self::EffectivePeriod => 2,
            Self::FraudKeywords => 0,
            _ => 1,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PatternKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for pattern building.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The regex pattern is invalid.
    #[error("invalid regex for {key}: {source}")]
    Regex {
        key: PatternKey,
        #[source]
        source: Box<regex::Error>,
    },

    /// The pattern has fewer capture groups than the extractor reads.
    #[error("pattern for {key} needs {expected} capture group(s), found {found}")]
    CaptureGroups {
        key: PatternKey,
        expected: usize,
        found: usize,
    },

    /// The same key was defined twice in one set.
    #[error("duplicate pattern for {0}")]
    Duplicate(PatternKey),

    /// No pattern was defined for a key.
    #[error("missing pattern for {0}")]
    Missing(PatternKey),
}

/// Definition of a single extraction pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDef {
    /// What this pattern locates.
    pub key: PatternKey,

    /// Regex pattern to match text.
    pub pattern: String,
}

impl PatternDef {
    #[must_use]
    pub fn new(key: PatternKey, pattern: impl Into<String>) -> Self {
        Self {
            key,
            pattern: pattern.into(),
        }
    }

    /// Compile this definition.
    ///
    /// # Errors
    /// Returns an error if the regex is invalid or lacks the capture groups
    /// the extractor reads for this key.
    pub fn build(&self) -> Result<Regex, BuildError> {
        let regex = Regex::new(&self.pattern).map_err(|source| BuildError::Regex {
            key: self.key,
            source: Box::new(source),
        })?;

        let found = regex.captures_len() - 1;
        let expected = self.key.required_groups();
        if found < expected {
            return Err(BuildError::CaptureGroups {
                key: self.key,
                expected,
                found,
            });
        }

        Ok(regex)
    }
}

/// Compiled, read-only pattern table with exactly one regex per key.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: [Regex; PatternKey::COUNT],
}

static BUILTIN: OnceLock<PatternLibrary> = OnceLock::new();

impl PatternLibrary {
    /// Compile a complete set of definitions.
    ///
    /// # Errors
    /// Returns an error if a definition fails to compile, a key is defined
    /// twice, or a key has no definition.
    pub fn from_defs(defs: &[PatternDef]) -> Result<Self, BuildError> {
        let mut slots: [Option<Regex>; PatternKey::COUNT] = std::array::from_fn(|_| None);

        for def in defs {
            let slot = &mut slots[def.key.index()];
            if slot.is_some() {
                return Err(BuildError::Duplicate(def.key));
            }
            *slot = Some(def.build()?);
        }

        let mut compiled = Vec::with_capacity(PatternKey::COUNT);
        for (key, slot) in PatternKey::ALL.into_iter().zip(slots) {
            compiled.push(slot.ok_or(BuildError::Missing(key))?);
        }

        let patterns = compiled
            .try_into()
            .map_err(|_| BuildError::Missing(PatternKey::FraudKeywords))?;
        Ok(Self { patterns })
    }

    /// Start from the default patterns and replace the keys named in
    /// `overrides`.
    ///
    /// # Errors
    /// Returns an error if an override fails to compile or names the same
    /// key twice.
    pub fn with_overrides(overrides: &[PatternDef]) -> Result<Self, BuildError> {
        let mut defs = default_patterns();
        let mut seen = [false; PatternKey::COUNT];

        for def in overrides {
            let index = def.key.index();
            if seen[index] {
                return Err(BuildError::Duplicate(def.key));
            }
            seen[index] = true;
            defs[index] = def.clone();
        }

        Self::from_defs(&defs)
    }

    /// Process-wide library compiled from [`default_patterns`] on first use.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "Built-in patterns are covered by tests and cannot fail at runtime"
    )]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            Self::from_defs(&default_patterns()).expect("built-in patterns are valid")
        })
    }

    /// Compiled regex for a key.
    #[must_use]
    pub fn get(&self, key: PatternKey) -> &Regex {
        &self.patterns[key.index()]
    }
}

/// Label pattern for calendar dates such as `03/04/2024` or `3-4-24`.
const DATE: &str = r"[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}";

/// Amount with optional thousands separators and two fraction digits.
const AMOUNT: &str = r"[0-9,]+(?:\.[0-9]{2})?";

/// Default pattern set, ordered by [`PatternKey`].
#[must_use]
pub fn default_patterns() -> Vec<PatternDef> {
    vec![
        PatternDef::new(
            PatternKey::PolicyNumber,
            r"(?i)policy\s*(?:number|#|no\.?)\s*:?\s*([A-Z0-9-]+)",
        ),
        PatternDef::new(
            PatternKey::PolicyholderName,
            r"(?i)policyholder\s*(?:name)?\s*:?\s*([A-Za-z\s.]+?)(?:\n|Policy|Incident|$)",
        ),
        PatternDef::new(
            PatternKey::EffectivePeriod,
            format!(r"(?i)effective\s*(?:date|period)?\s*:?\s*({DATE})\s*(?:to|-|through)\s*({DATE})"),
        ),
        PatternDef::new(
            PatternKey::IncidentDate,
            format!(r"(?i)(?:incident|loss|accident)\s*date\s*:?\s*({DATE})"),
        ),
        PatternDef::new(
            PatternKey::IncidentTime,
            r"(?i)(?:incident|loss|accident)\s*time\s*:?\s*([0-9]{1,2}:[0-9]{2}\s*(?:AM|PM)?)",
        ),
        PatternDef::new(
            PatternKey::Location,
            r"(?i)location\s*:?\s*([^\n]+?)(?:\n|Description|$)",
        ),
        // Continuation lines are kept unless they open with an ASCII `word:`
        // label.
        PatternDef::new(
            PatternKey::Description,
            r"(?im)(?:incident\s*)?description\s*:?\s*([^\n]+(?:\n(?:[^A-Za-z0-9_\n][^\n]*|[A-Za-z0-9_]+(?:[^A-Za-z0-9_:\n][^\n]*)?$))*)",
        ),
        PatternDef::new(
            PatternKey::ClaimantName,
            r"(?i)claimant\s*(?:name)?\s*:?\s*([A-Za-z\s.]+?)(?:\n|Contact|Third|$)",
        ),
        PatternDef::new(
            PatternKey::ContactDetails,
            r"(?i)contact\s*(?:details|info)?\s*:?\s*([^\n]+)",
        ),
        PatternDef::new(
            PatternKey::AssetType,
            r"(?i)asset\s*type\s*:?\s*([A-Za-z\s]+?)(?:\n|Asset ID|$)",
        ),
        PatternDef::new(
            PatternKey::AssetId,
            r"(?i)asset\s*(?:id|identifier)\s*:?\s*([A-Z0-9-]+)",
        ),
        PatternDef::new(
            PatternKey::EstimatedDamage,
            format!(r"(?i)estimated\s*damage\s*:?\s*\$?\s*({AMOUNT})"),
        ),
        PatternDef::new(
            PatternKey::ClaimType,
            r"(?i)claim\s*type\s*:?\s*([A-Za-z\s]+?)(?:\n|Attachments|$)",
        ),
        PatternDef::new(
            PatternKey::InitialEstimate,
            format!(r"(?i)initial\s*estimate\s*:?\s*\$?\s*({AMOUNT})"),
        ),
        PatternDef::new(
            PatternKey::Attachments,
            r"(?i)attachments?\s*:?\s*([^\n]+)",
        ),
        PatternDef::new(
            PatternKey::FraudKeywords,
            r"(?i)\b(?:fraud|fraudulent|inconsistent|staged|suspicious|fake|fabricated)\b",
        ),
    ]
}
