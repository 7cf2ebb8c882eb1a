//! Declarative price-list source definitions.
//!
//! A source's column layout is data, not code: the [`FieldMap`] names which
//! file column feeds each canonical field and whether it is mandatory. The
//! scraper ships built-in definitions; `config/sources.yaml` can override
//! them per chain without a rebuild.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CanonicalField;
use crate::ConfigError;

/// Source column feeding one canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub column: String,
    #[serde(default)]
    pub required: bool,
}

impl ColumnSpec {
    #[must_use]
    pub fn required(column: &str) -> Self {
        Self {
            column: column.to_string(),
            required: true,
        }
    }

    #[must_use]
    pub fn optional(column: &str) -> Self {
        Self {
            column: column.to_string(),
            required: false,
        }
    }
}

/// Canonical field → source column. Iterates in [`CanonicalField`] order.
pub type FieldMap = BTreeMap<CanonicalField, ColumnSpec>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Chain code stored on every [`crate::StoreIdentity`], e.g. `"zabac"`.
    pub chain: String,
    /// Human-readable chain label used in store display names.
    pub label: String,
    /// Page listing the currently published catalog files.
    pub index_url: String,
    /// WHATWG encoding labels, tried in order when decoding catalog files.
    pub encodings: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Catalog file extension matched against index links.
    #[serde(default = "default_extension")]
    pub file_extension: String,
    /// Value for `unit` when the file does not provide one.
    #[serde(default)]
    pub default_unit: String,
    pub fields: FieldMap,
}

impl SourceConfig {
    /// The field delimiter as the single byte the row parser expects.
    ///
    /// Validation guarantees the delimiter is ASCII; this falls back to a
    /// comma for hand-built configs that skipped validation.
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_extension() -> String {
    ".csv".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl SourcesFile {
    #[must_use]
    pub fn find(&self, chain: &str) -> Option<&SourceConfig> {
        self.sources
            .iter()
            .find(|s| s.chain.eq_ignore_ascii_case(chain))
    }
}

/// Load and validate source definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_sources(&content)
}

/// Parse and validate source definitions from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(yaml: &str) -> Result<SourcesFile, ConfigError> {
    let sources_file: SourcesFile = serde_yaml::from_str(yaml)?;
    validate_sources(&sources_file)?;
    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen_chains = HashSet::new();

    for source in &sources_file.sources {
        if source.chain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source chain must be non-empty".to_string(),
            ));
        }
        if !seen_chains.insert(source.chain.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source chain: '{}'",
                source.chain
            )));
        }
        validate_source(source)?;
    }

    Ok(())
}

/// Validate a single source definition.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] describing the first problem found.
pub fn validate_source(source: &SourceConfig) -> Result<(), ConfigError> {
    let chain = &source.chain;

    if source.label.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "source '{chain}' has an empty label"
        )));
    }
    if source.index_url.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "source '{chain}' has an empty index_url"
        )));
    }
    if source.encodings.is_empty() {
        return Err(ConfigError::Validation(format!(
            "source '{chain}' must declare at least one encoding"
        )));
    }
    if !source.delimiter.is_ascii() {
        return Err(ConfigError::Validation(format!(
            "source '{chain}' delimiter {:?} is not a single ASCII character",
            source.delimiter
        )));
    }

    for field in [CanonicalField::ProductId, CanonicalField::Product] {
        match source.fields.get(&field) {
            Some(spec) if spec.required => {}
            Some(_) => {
                return Err(ConfigError::Validation(format!(
                    "source '{chain}' must mark '{field}' as required"
                )));
            }
            None => {
                return Err(ConfigError::Validation(format!(
                    "source '{chain}' does not map required field '{field}'"
                )));
            }
        }
    }

    if let Some((field, _)) = source
        .fields
        .iter()
        .find(|(_, spec)| spec.column.trim().is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "source '{chain}' maps '{field}' to an empty column name"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
