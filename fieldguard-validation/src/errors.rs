// Validation errors

use std::fmt;
use thiserror::Error;

/// A single field violation produced while evaluating a schema
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Human-readable message, already mentioning the field
    pub message: String,

    /// Constraint that failed (`required`, `minLength`, `isFutureDate`, ...)
    pub constraint: String,

    /// Offending value rendered as JSON (optional)
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            value: None,
        }
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered collection of field violations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new validation errors collection
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add an error
    pub fn add(&mut self, error: ValidationError) {
        tracing::trace!(
            field = %error.field,
            constraint = %error.constraint,
            "Field violation recorded"
        );
        self.errors.push(error);
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Messages in evaluation order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "field": e.field,
                    "message": e.message,
                    "constraint": e.constraint,
                    "value": e.value,
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Structural failures: malformed schema definitions or malformed calls.
///
/// These are never folded into a [`ValidationReport`](crate::ValidationReport).
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema field name must not be empty")]
    EmptyFieldName,

    #[error("Field '{0}' is defined more than once")]
    DuplicateField(String),

    #[error("Constraint '{constraint}' cannot be applied to '{field}' of type {field_type}")]
    IncompatibleConstraint {
        field: String,
        constraint: &'static str,
        field_type: String,
    },

    #[error("Field '{field}' has inverted {constraint} bounds: {min} > {max}")]
    InvalidBounds {
        field: String,
        constraint: &'static str,
        min: String,
        max: String,
    },

    #[error("Field '{field}' has a non-finite {constraint} bound")]
    NonFiniteBound {
        field: String,
        constraint: &'static str,
    },

    #[error("Field '{field}' has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Expected an object to validate, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Failed to serialize input: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Invalid schema definition: {0}")]
    Definition(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
