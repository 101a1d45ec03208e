//! Extraction engine for structured claim fields.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::extraction::parse::{
    AmountError, parse_amount, parse_date, parse_time, split_attachments,
};
use crate::fields::{FieldName, StructuredFields};
use crate::patterns::{PatternKey, PatternLibrary};

/// Extraction engine that turns raw document text into [`StructuredFields`].
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    library: PatternLibrary,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FieldExtractor {
    #[must_use]
    pub const fn new(library: PatternLibrary) -> Self {
        Self { library }
    }

    /// Create an extractor over the built-in pattern library.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PatternLibrary::builtin().clone())
    }

    #[must_use]
    pub const fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Extract every field from `text`.
    ///
    /// Each field uses the first match of its pattern in document order.
    /// A field whose pattern does not match, or whose date or time does not
    /// parse, is left absent without affecting the others.
    ///
    /// # Errors
    /// Returns [`ExtractionError::InvalidAmount`] if a currency pattern matches
    /// text that is not a number once thousands separators are removed, and
    /// [`ExtractionError::AmountOutOfRange`] if the number is too large to hold.
    pub fn extract(&self, text: &str) -> Result<StructuredFields> {
        let (effective_start_date, effective_end_date) = self.effective_period(text);

        let fields = StructuredFields {
            policy_number: self.text(PatternKey::PolicyNumber, text),
            policyholder_name: self.text(PatternKey::PolicyholderName, text),
            effective_start_date,
            effective_end_date,
            incident_date: self.date(PatternKey::IncidentDate, text),
            incident_time: self.time(PatternKey::IncidentTime, text),
            location: self.text(PatternKey::Location, text),
            description: self.text(PatternKey::Description, text),
            claimant_name: self.text(PatternKey::ClaimantName, text),
            third_parties: third_parties(text),
            contact_details: self.text(PatternKey::ContactDetails, text),
            asset_type: self.text(PatternKey::AssetType, text),
            asset_id: self.text(PatternKey::AssetId, text),
            estimated_damage: self.amount(
                PatternKey::EstimatedDamage,
                FieldName::EstimatedDamage,
                text,
            )?,
            claim_type: self.text(PatternKey::ClaimType, text),
            attachments: self
                .capture(PatternKey::Attachments, text)
                .map(split_attachments)
                .unwrap_or_default(),
            initial_estimate: self.amount(
                PatternKey::InitialEstimate,
                FieldName::InitialEstimate,
                text,
            )?,
        };

        debug!(
            policy_number = ?fields.policy_number,
            incident_date = ?fields.incident_date,
            estimated_damage = ?fields.estimated_damage,
            "Extracted claim fields"
        );

        Ok(fields)
    }

    /// Capture group 1 of the first match.
    fn capture<'t>(&self, key: PatternKey, text: &'t str) -> Option<&'t str> {
        let caps = self.library.get(key).captures(text)?;
        caps.get(1).map(|m| m.as_str())
    }

    fn text(&self, key: PatternKey, text: &str) -> Option<String> {
        let value = self.capture(key, text)?.trim().to_string();
        debug!(field = %key, value = %value, "Matched text field");
        Some(value)
    }

    fn date(&self, key: PatternKey, text: &str) -> Option<NaiveDate> {
        let raw = self.capture(key, text)?;
        let date = parse_date(raw.trim());
        if date.is_none() {
            debug!(field = %key, raw, "Unparseable date, leaving field absent");
        }
        date
    }

    fn time(&self, key: PatternKey, text: &str) -> Option<NaiveTime> {
        let raw = self.capture(key, text)?;
        let time = parse_time(raw.trim());
        if time.is_none() {
            debug!(field = %key, raw, "Unparseable time, leaving field absent");
        }
        time
    }

    fn amount(&self, key: PatternKey, field: FieldName, text: &str) -> Result<Option<Decimal>> {
        let Some(raw) = self.capture(key, text) else {
            return Ok(None);
        };
        let raw = raw.trim();
        parse_amount(raw).map(Some).map_err(|e| {
            let raw = raw.to_string();
            match e {
                AmountError::Malformed => ExtractionError::InvalidAmount { field, raw },
                AmountError::OutOfRange => ExtractionError::AmountOutOfRange { field, raw },
            }
        })
    }

    /// Start and end dates share one match of the effective-period pattern.
    fn effective_period(&self, text: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let Some(caps) = self.library.get(PatternKey::EffectivePeriod).captures(text) else {
            return (None, None);
        };
        let parse = |group: usize| caps.get(group).and_then(|m| parse_date(m.as_str().trim()));
        (parse(1), parse(2))
    }
}

/// Third-party names are not extracted yet; the list is always empty.
fn third_parties(_text: &str) -> Vec<String> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternDef, default_patterns};

    #[test]
    fn test_empty_text_yields_all_absent() -> Result<()> {
        let fields = FieldExtractor::with_defaults().extract("")?;
        assert_eq!(fields, StructuredFields::default());
        Ok(())
    }

    #[test]
    fn test_first_match_wins() -> Result<()> {
        let text = "Policy Number: FIRST-1\nPolicy Number: SECOND-2\n";
        let fields = FieldExtractor::with_defaults().extract(text)?;
        assert_eq!(fields.policy_number.as_deref(), Some("FIRST-1"));
        Ok(())
    }

    #[test]
    fn test_unparseable_date_is_absent_not_error() -> Result<()> {
        let fields = FieldExtractor::with_defaults().extract("Incident Date: 3/4/24\n")?;
        assert_eq!(fields.incident_date, None);
        Ok(())
    }

    #[test]
    fn test_effective_period_parses_both_ends() -> Result<()> {
        let text = "Effective Period: 01/01/2024 to 12/31/2024\n";
        let fields = FieldExtractor::with_defaults().extract(text)?;
        assert_eq!(fields.effective_start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(fields.effective_end_date, NaiveDate::from_ymd_opt(2024, 12, 31));
        Ok(())
    }

    #[test]
    fn test_effective_period_ends_parse_independently() -> Result<()> {
        let text = "Effective Date: 1/5/24 - 01/05/2025\n";
        let fields = FieldExtractor::with_defaults().extract(text)?;
        assert_eq!(fields.effective_start_date, None);
        assert_eq!(fields.effective_end_date, NaiveDate::from_ymd_opt(2025, 1, 5));
        Ok(())
    }

    #[test]
    fn test_malformed_amount_is_an_error() {
        let result = FieldExtractor::with_defaults().extract("Estimated Damage: $,,,\n");
        assert_eq!(
            result,
            Err(ExtractionError::InvalidAmount {
                field: FieldName::EstimatedDamage,
                raw: ",,,".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_initial_estimate_is_an_error() {
        let result = FieldExtractor::with_defaults().extract("Initial Estimate: ,\n");
        assert!(matches!(
            result,
            Err(ExtractionError::InvalidAmount {
                field: FieldName::InitialEstimate,
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_amount_is_not_a_client_error() {
        let result = FieldExtractor::with_defaults()
            .extract("Estimated Damage: $100,000,000,000,000,000,000,000,000,000\n");
        assert!(matches!(
            result,
            Err(ExtractionError::AmountOutOfRange {
                field: FieldName::EstimatedDamage,
                ..
            })
        ));
        assert!(result.is_err_and(|e| !e.is_client_error()));
    }

    #[test]
    fn test_third_parties_always_empty() -> Result<()> {
        let text = "Third Party: Bob Jones\nThird Parties: Ann Lee; Tim Roe\n";
        let fields = FieldExtractor::with_defaults().extract(text)?;
        assert!(fields.third_parties.is_empty());
        Ok(())
    }

    #[test]
    fn test_custom_library_is_used() -> Result<()> {
        let mut defs = default_patterns();
        defs[PatternKey::Location as usize] =
            PatternDef::new(PatternKey::Location, r"(?i)place\s*=\s*([^\n]+)");
        let library = match PatternLibrary::from_defs(&defs) {
            Ok(library) => library,
            Err(e) => panic!("custom patterns should build: {e}"),
        };

        let fields = FieldExtractor::new(library).extract("Place = Dock 4\nLocation: ignored\n")?;
        assert_eq!(fields.location.as_deref(), Some("Dock 4"));
        Ok(())
    }

    #[test]
    fn test_clock_hour_zero_time_is_extracted() -> Result<()> {
        let fields = FieldExtractor::with_defaults().extract("Incident Time: 00:30 AM\n")?;
        assert_eq!(fields.incident_time, NaiveTime::from_hms_opt(0, 30, 0));
        Ok(())
    }

    #[test]
    fn test_widened_date_capture_leaves_huge_year_absent() -> Result<()> {
        let library = match PatternLibrary::with_overrides(&[PatternDef::new(
            PatternKey::IncidentDate,
            r"(?i)incident\s*date\s*:?\s*(\S+)",
        )]) {
            Ok(library) => library,
            Err(e) => panic!("override should build: {e}"),
        };

        let fields = FieldExtractor::new(library).extract("Incident Date: 12/31/2147483647\n")?;
        assert_eq!(fields.incident_date, None);
        Ok(())
    }
}
