//! Configuration file parsing.
//!
//! Parses individual `.offsets.toml` files into `RawConfig` structures that keep every field
//! optional until files are merged.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ConfigError, OutputFormat};

/// Raw configuration as parsed directly from a TOML file.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Analyzer section.
    pub analyzer: Option<RawAnalyzerSettings>,
    /// Synonyms: word -> one synonym or a list of synonyms.
    #[serde_as(as = "Option<BTreeMap<_, OneOrMany<_>>>")]
    pub synonyms: Option<BTreeMap<String, Vec<String>>>,
    /// Output section.
    pub output: Option<RawOutputSettings>,
}

/// Raw analyzer settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnalyzerSettings {
    /// Stemming language, or "none".
    pub stemmer: Option<String>,
    /// Maximum token length in bytes.
    pub max_token_length: Option<usize>,
}

/// Raw output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Output format.
    pub format: Option<OutputFormat>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}
