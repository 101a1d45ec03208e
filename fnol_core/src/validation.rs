//! Mandatory-field validation.
//!
//! The mandatory set is a static table pairing each field name with a typed
//! presence check, so a renamed member of [`StructuredFields`] fails to
//! compile instead of silently reporting the field as missing.

use crate::fields::{FieldName, StructuredFields};

/// A mandatory field and the accessor that checks its presence.
#[derive(Debug, Clone, Copy)]
pub struct MandatoryField {
    pub name: FieldName,
    is_present: fn(&StructuredFields) -> bool,
}

impl MandatoryField {
    #[must_use]
    pub fn is_present(&self, fields: &StructuredFields) -> bool {
        (self.is_present)(fields)
    }
}

/// Fields whose absence forces manual review, in report order.
pub const MANDATORY_FIELDS: [MandatoryField; 10] = [
    MandatoryField {
        name: FieldName::PolicyNumber,
        is_present: |f| f.policy_number.is_some(),
    },
    MandatoryField {
        name: FieldName::PolicyholderName,
        is_present: |f| f.policyholder_name.is_some(),
    },
    MandatoryField {
        name: FieldName::IncidentDate,
        is_present: |f| f.incident_date.is_some(),
    },
    MandatoryField {
        name: FieldName::Location,
        is_present: |f| f.location.is_some(),
    },
    MandatoryField {
        name: FieldName::Description,
        is_present: |f| f.description.is_some(),
    },
    MandatoryField {
        name: FieldName::ClaimantName,
        is_present: |f| f.claimant_name.is_some(),
    },
    MandatoryField {
        name: FieldName::ContactDetails,
        is_present: |f| f.contact_details.is_some(),
    },
    MandatoryField {
        name: FieldName::AssetType,
        is_present: |f| f.asset_type.is_some(),
    },
    MandatoryField {
        name: FieldName::EstimatedDamage,
        is_present: |f| f.estimated_damage.is_some(),
    },
    MandatoryField {
        name: FieldName::ClaimType,
        is_present: |f| f.claim_type.is_some(),
    },
];

/// Mandatory fields absent from `fields`, in [`MANDATORY_FIELDS`] order.
#[must_use]
pub fn missing_fields(fields: &StructuredFields) -> Vec<FieldName> {
    MANDATORY_FIELDS
        .iter()
        .filter(|mandatory| !mandatory.is_present(fields))
        .map(|mandatory| mandatory.name)
        .collect()
}

#[must_use]
pub fn all_mandatory_present(fields: &StructuredFields) -> bool {
    MANDATORY_FIELDS
        .iter()
        .all(|mandatory| mandatory.is_present(fields))
}
