use std::fmt;

use thiserror::Error;

/// Why a form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Field absent or blank.
    Missing,
    /// Value could not be parsed as a finite number.
    NotANumber,
    /// Numeric value outside the field's domain (e.g. a non-positive age).
    OutOfRange,
    /// Categorical value is not one of the field's codes.
    UnknownCode,
}

impl ValidationReason {
    /// Short human-readable description.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Missing => "value is missing",
            Self::NotANumber => "value is not a number",
            Self::OutOfRange => "value is out of range",
            Self::UnknownCode => "value is not an allowed code",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A form field failed validation; no record was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please enter a valid value for {field}")]
pub struct ValidationError {
    /// Key of the first offending field, in catalog order.
    pub field: &'static str,
    /// What was wrong with it.
    pub reason: ValidationReason,
}

impl ValidationError {
    #[must_use]
    pub const fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }

    /// Message including the reason, for logs and verbose output.
    #[must_use]
    pub fn detail(&self) -> String {
        format!("{}: {}", self.field, self.reason)
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
