//! Field validation for fieldguard
//!
//! Validates structured input (JSON objects) against a compiled schema and
//! collects a human-readable message for every violation. Arbitrary record-level
//! rules can be run alongside the schema; both paths produce the same
//! [`ValidationReport`].
//!
//! # Examples
//!
//! ## Schema Validation
//!
//! ```
//! use fieldguard_validation::{create_validator, FieldConstraint, SchemaDefinition};
//! use serde_json::json;
//!
//! let validator = create_validator(
//!     &SchemaDefinition::new()
//!         .field("name", FieldConstraint::string().required())
//!         .field("age", FieldConstraint::number().min(0.0)),
//! )
//! .unwrap();
//!
//! // Every violation is reported, not just the first
//! let report = validator.validate(&json!({ "age": -1 })).unwrap();
//! assert!(!report.is_valid());
//! assert_eq!(
//!     report.errors(),
//!     ["name is a required field", "age must be greater than or equal to 0"]
//! );
//! ```
//!
//! ## Declarative Definitions
//!
//! ```
//! use fieldguard_validation::{create_validator, SchemaDefinition};
//! use serde_json::json;
//!
//! let definition = SchemaDefinition::from_json_str(r#"{
//!     "email": { "type": "string", "required": true, "email": true },
//!     "bio":   { "type": "string", "maxLength": 10 }
//! }"#).unwrap();
//!
//! let validator = create_validator(&definition).unwrap();
//! let report = validator.validate(&json!({ "email": "ada@example.com" })).unwrap();
//! assert!(report.is_valid());
//! ```
//!
//! ## Custom Rules
//!
//! ```
//! use fieldguard_validation::{validate_custom_rules, LengthOptions, Rule};
//! use serde_json::json;
//!
//! let rules = vec![
//!     Rule::email("email"),
//!     Rule::string_length("username", LengthOptions::new(3, 16)),
//! ];
//!
//! let report = validate_custom_rules(&json!({ "email": "nope", "username": "al" }), &rules);
//! assert_eq!(
//!     report.errors(),
//!     ["Invalid email format.", "String must be between 3 and 16 characters long."]
//! );
//! ```

mod clock;
mod config;
pub mod errors;
mod report;
mod rules;
mod schema;
mod validator;
pub mod validators;

pub use clock::*;
pub use config::*;
pub use errors::{SchemaError, ValidationError, ValidationErrors};
pub use report::*;
pub use rules::*;
pub use schema::*;
pub use validator::*;
