// Validator factory and orchestration

use crate::errors::Result;
use crate::{
    Clock, Rule, Schema, SchemaDefinition, SchemaError, SystemClock, ValidationReport,
    ValidatorConfig, validate_custom_rules,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Compile `definition` once and return a reusable validator
pub fn create_validator(definition: &SchemaDefinition) -> Result<Validator> {
    Ok(Validator::new(Schema::compile(definition)?))
}

/// Run `schema` against `data` with the system clock and default options
pub fn validate(data: &Value, schema: &Schema) -> Result<ValidationReport> {
    run(schema, data, &ValidatorConfig::default(), &SystemClock)
}

fn run(
    schema: &Schema,
    data: &Value,
    config: &ValidatorConfig,
    clock: &dyn Clock,
) -> Result<ValidationReport> {
    let errors = schema.evaluate(data, config, clock.now())?;

    tracing::debug!(
        fields = schema.len(),
        errors = errors.len(),
        "Schema validation finished"
    );

    Ok(ValidationReport::from(errors))
}

/// A compiled schema bound to its options and clock.
///
/// Cloning is cheap and clones share the compiled schema; nothing is mutated
/// after construction, so a validator can be used from many threads at once.
#[derive(Clone)]
pub struct Validator {
    schema: Arc<Schema>,
    config: ValidatorConfig,
    clock: Arc<dyn Clock>,
}

impl Validator {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            config: ValidatorConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the time source used by future-date constraints
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Validate `data` against the compiled schema.
    ///
    /// Field violations come back in the report; `Err` means the call itself
    /// was malformed (e.g. `data` is not an object).
    pub fn validate(&self, data: &Value) -> Result<ValidationReport> {
        run(&self.schema, data, &self.config, self.clock.as_ref())
    }

    /// Serialize `data` and validate the result
    pub fn validate_serialized<T: Serialize + ?Sized>(&self, data: &T) -> Result<ValidationReport> {
        let value = serde_json::to_value(data).map_err(SchemaError::Serialization)?;
        self.validate(&value)
    }

    /// Run `rules` against `data`; the schema is not consulted
    pub fn validate_custom(&self, data: &Value, rules: &[Rule]) -> ValidationReport {
        validate_custom_rules(data, rules)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Shared handle to this validator's clock, for building time-dependent rules
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("schema", &self.schema)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
