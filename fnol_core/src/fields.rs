//! Structured claim fields produced by extraction.
//!
//! Every member of [`StructuredFields`] is independently optional: a value is
//! present only when its pattern matched and the captured text parsed for its
//! type. Nothing is ever defaulted to an empty string or zero.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name of a member of [`StructuredFields`].
///
/// The serialized form is the camelCase name used in the missing-fields
/// report and the JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum FieldName {
    PolicyNumber = 0,
    PolicyholderName = 1,
    EffectiveStartDate = 2,
    EffectiveEndDate = 3,
    IncidentDate = 4,
    IncidentTime = 5,
    Location = 6,
    Description = 7,
    ClaimantName = 8,
    ThirdParties = 9,
    ContactDetails = 10,
    AssetType = 11,
    AssetId = 12,
    EstimatedDamage = 13,
    ClaimType = 14,
    Attachments = 15,
    InitialEstimate = 16,
}

impl FieldName {
    /// Returns the camelCase name of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PolicyNumber => "policyNumber",
            Self::PolicyholderName => "policyholderName",
            Self::EffectiveStartDate => "effectiveStartDate",
            Self::EffectiveEndDate => "effectiveEndDate",
            Self::IncidentDate => "incidentDate",
            Self::IncidentTime => "incidentTime",
            Self::Location => "location",
            Self::Description => "description",
            Self::ClaimantName => "claimantName",
            Self::ThirdParties => "thirdParties",
            Self::ContactDetails => "contactDetails",
            Self::AssetType => "assetType",
            Self::AssetId => "assetId",
            Self::EstimatedDamage => "estimatedDamage",
            Self::ClaimType => "claimType",
            Self::Attachments => "attachments",
            Self::InitialEstimate => "initialEstimate",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured view of a First Notice of Loss document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredFields {
    // Policy information
    pub policy_number: Option<String>,
    pub policyholder_name: Option<String>,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,

    // Incident information
    pub incident_date: Option<NaiveDate>,
    pub incident_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,

    // Involved parties
    pub claimant_name: Option<String>,
    pub third_parties: Vec<String>,
    pub contact_details: Option<String>,

    // Asset details
    pub asset_type: Option<String>,
    pub asset_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub estimated_damage: Option<Decimal>,

    // Claim details
    pub claim_type: Option<String>,
    pub attachments: Vec<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub initial_estimate: Option<Decimal>,
}
