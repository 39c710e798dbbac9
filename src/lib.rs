// fieldguard - field-level validation for structured input
//
// Re-exports the validation engine and, behind the `config` feature, manifest
// loading from JSON/TOML files.

// Re-export core functionality
pub use fieldguard_validation::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use fieldguard_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Clock,
        Constraint,
        CustomRule,
        FieldConstraint,
        FieldType,
        FixedClock,
        LengthOptions,
        Rule,
        RuleSet,
        Schema,
        SchemaDefinition,
        SchemaError,
        SystemClock,
        ValidationReport,
        Validator,
        ValidatorConfig,
        create_validator,
        validate_custom_rules,
        validate_email,
        validate_string_length,
    };

    #[cfg(feature = "config")]
    pub use fieldguard_config::{FileFormat, ValidatorManifest, load_validator};
}
