// Error types for manifest loading

use fieldguard_validation::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load manifest: {0}")]
    LoadError(String),

    #[error("Failed to parse manifest: {0}")]
    ParseError(String),

    #[error("Unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {key}: {value:?} (expected a boolean)")]
    InvalidEnvValue { key: String, value: String },

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
