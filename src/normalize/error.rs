//! Validation failures raised while normalizing a payload.

use thiserror::Error;

/// Why a payload could not be turned into a canonical request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// Action signal missing, not a string, or not a 0/1 digit string.
    #[error("action01 must be a non-empty string of 0/1 digits")]
    InvalidActionSignal,

    /// Row data missing, null or blank.
    #[error("rowDataJson is missing or invalid")]
    MissingOrInvalidRowData,

    /// Optional parameter supplied but unreadable (strict mode only).
    #[error("{field} must be {expected}")]
    InvalidParameter {
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationFailure {
    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationFailure::InvalidActionSignal => "InvalidActionSignal",
            ValidationFailure::MissingOrInvalidRowData => "MissingOrInvalidRowData",
            ValidationFailure::InvalidParameter { .. } => "InvalidParameter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationFailure::InvalidParameter {
            field: "maxLag",
            expected: "an integer",
        };
        assert_eq!(err.to_string(), "maxLag must be an integer");
        assert_eq!(err.reason(), "InvalidParameter");
        assert!(ValidationFailure::InvalidActionSignal.to_string().contains("0/1"));
    }
}
