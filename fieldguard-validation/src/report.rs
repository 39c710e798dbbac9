// Uniform validation result

use crate::ValidationErrors;
use serde::Serialize;

/// Result of every validation entry point.
///
/// `is_valid` is derived from `errors`, so `is_valid() == errors().is_empty()`
/// always holds. Serializes as `{"isValid": .., "errors": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationReport {
    /// A report with no errors
    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Error messages in evaluation order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Append another report's errors after this one's
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.errors.extend(other.errors);
        Self::from_errors(self.errors)
    }

    /// `Ok(())` when valid, otherwise the messages
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::valid()
    }
}

impl From<ValidationErrors> for ValidationReport {
    fn from(errors: ValidationErrors) -> Self {
        Self::from_errors(errors.into_iter().map(|e| e.message).collect())
    }
}

impl FromIterator<String> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_errors(iter.into_iter().collect())
    }
}
