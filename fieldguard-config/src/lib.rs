//! Manifest loading for fieldguard
//!
//! A manifest pairs [`ValidatorConfig`](fieldguard_validation::ValidatorConfig)
//! options with a declarative field definition, stored as JSON or TOML.
//! Environment variables (`FIELDGUARD_DENY_UNKNOWN_FIELDS`,
//! `FIELDGUARD_TREAT_NULL_AS_MISSING`, `FIELDGUARD_COERCE_TYPES`) override the
//! file's options.
//!
//! ```
//! use fieldguard_config::{FileFormat, load_validator_from_str};
//! use serde_json::json;
//!
//! let validator = load_validator_from_str(
//!     r#"
//!     [fields.name]
//!     type = "string"
//!     required = true
//!     "#,
//!     FileFormat::Toml,
//! )
//! .unwrap();
//!
//! let report = validator.validate(&json!({})).unwrap();
//! assert_eq!(report.errors(), ["name is a required field"]);
//! ```

pub mod env;
pub mod error;
pub mod loader;

pub use env::{DEFAULT_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, ManifestLoader, ValidatorManifest};

use fieldguard_validation::Validator;
use std::path::Path;

/// Load a manifest file, apply environment overrides and compile it
pub fn load_validator(path: impl AsRef<Path>) -> Result<Validator> {
    let path = path.as_ref();
    let manifest = ManifestLoader::auto(path)?.load_file(path)?;
    build_with_env(manifest)
}

/// Parse a manifest from a string, apply environment overrides and compile it
pub fn load_validator_from_str(content: &str, format: FileFormat) -> Result<Validator> {
    let manifest = ManifestLoader::new(format).parse(content)?;
    build_with_env(manifest)
}

fn build_with_env(mut manifest: ValidatorManifest) -> Result<Validator> {
    manifest.config = EnvLoader::default().apply(manifest.config)?;
    manifest.build()
}
