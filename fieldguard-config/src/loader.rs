// Manifest file loaders

use crate::{ConfigError, Result};
use fieldguard_validation::{SchemaDefinition, Validator, ValidatorConfig, create_validator};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Toml => "toml",
        }
    }
}

/// Validator options plus field definitions, as stored on disk.
///
/// ```toml
/// [config]
/// deny_unknown_fields = true
///
/// [fields.name]
/// type = "string"
/// required = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorManifest {
    #[serde(default)]
    pub config: ValidatorConfig,

    #[serde(default)]
    pub fields: SchemaDefinition,
}

impl ValidatorManifest {
    /// Compile the field definitions and apply the options
    pub fn build(&self) -> Result<Validator> {
        Ok(create_validator(&self.fields)?.with_config(self.config))
    }
}

/// Manifest loader for a single format
pub struct ManifestLoader {
    format: FileFormat,
}

impl ManifestLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_string()))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load a manifest from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ValidatorManifest> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e)))?;

        let manifest = self.parse(&content)?;

        tracing::info!(
            path = %path.display(),
            format = self.format.as_str(),
            fields = manifest.fields.len(),
            "Validator manifest loaded"
        );

        Ok(manifest)
    }

    /// Parse a manifest from string
    pub fn parse(&self, content: &str) -> Result<ValidatorManifest> {
        match self.format {
            FileFormat::Json => self.parse_json(content),
            FileFormat::Toml => self.parse_toml(content),
        }
    }

    fn parse_json(&self, content: &str) -> Result<ValidatorManifest> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    // Deserialized straight from the document so field order survives
    fn parse_toml(&self, content: &str) -> Result<ValidatorManifest> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }
}
