// Environment variable overrides

use crate::{ConfigError, Result};
use fieldguard_validation::ValidatorConfig;
use std::env;

/// Default prefix for override variables (`FIELDGUARD_DENY_UNKNOWN_FIELDS`, ...)
pub const DEFAULT_PREFIX: &str = "FIELDGUARD";

/// Environment variable loader
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Full variable name for an option key
    pub fn var_name(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, key.to_uppercase())
        }
    }

    /// Load a specific environment variable; `Ok(None)` when unset
    pub fn load_var(&self, key: &str) -> Result<Option<String>> {
        match env::var(self.var_name(key)) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::EnvError(e)),
        }
    }

    /// Apply overrides from the process environment
    pub fn apply(&self, config: ValidatorConfig) -> Result<ValidatorConfig> {
        let mut lookup_error = None;
        let config = self.apply_with(config, |name| match env::var(name) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(e) => {
                lookup_error.get_or_insert(e);
                None
            }
        })?;

        match lookup_error {
            Some(e) => Err(ConfigError::EnvError(e)),
            None => Ok(config),
        }
    }

    /// Apply overrides read through `lookup` (full variable name -> value)
    pub fn apply_with<F>(&self, mut config: ValidatorConfig, mut lookup: F) -> Result<ValidatorConfig>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(flag) = self.flag(&mut lookup, "deny_unknown_fields")? {
            config.deny_unknown_fields = flag;
        }
        if let Some(flag) = self.flag(&mut lookup, "treat_null_as_missing")? {
            config.treat_null_as_missing = flag;
        }
        if let Some(flag) = self.flag(&mut lookup, "coerce_types")? {
            config.coerce_types = flag;
        }
        Ok(config)
    }

    fn flag<F>(&self, lookup: &mut F, key: &str) -> Result<Option<bool>>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let name = self.var_name(key);
        let Some(raw) = lookup(&name) else {
            return Ok(None);
        };

        let flag = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvValue {
            key: name.clone(),
            value: raw.clone(),
        })?;

        tracing::debug!(var = %name, value = flag, "Validator option overridden from environment");
        Ok(Some(flag))
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
