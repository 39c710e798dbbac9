// Validator options

use serde::{Deserialize, Serialize};

/// Options applied while evaluating a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Report keys in the data that the schema does not declare
    pub deny_unknown_fields: bool,

    /// Treat JSON `null` the same as an absent field
    pub treat_null_as_missing: bool,

    /// Cast form-style input (`"5"`, `12345`, `"true"`) toward the declared type
    pub coerce_types: bool,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }

    pub fn treat_null_as_missing(mut self, treat: bool) -> Self {
        self.treat_null_as_missing = treat;
        self
    }

    pub fn coerce_types(mut self, coerce: bool) -> Self {
        self.coerce_types = coerce;
        self
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            deny_unknown_fields: false,
            treat_null_as_missing: true,
            coerce_types: true,
        }
    }
}
