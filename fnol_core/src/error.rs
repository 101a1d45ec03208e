use thiserror::Error;

use crate::fields::FieldName;

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Failure that aborts extraction of a whole document.
///
/// Missing or unparseable dates and times never surface here; they leave the
/// field absent. A matched amount that is not a number is reported instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("invalid amount for {field}: {raw:?}")]
    InvalidAmount { field: FieldName, raw: String },

    /// The amount is a valid number beyond what a 96-bit decimal can hold.
    #[error("amount for {field} exceeds the supported range: {raw:?}")]
    AmountOutOfRange { field: FieldName, raw: String },
}

impl ExtractionError {
    /// Whether the failure was caused by the submitted document rather than
    /// by the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidAmount { .. } => true,
            Self::AmountOutOfRange { .. } => false,
        }
    }
}
