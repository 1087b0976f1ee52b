//! Configuration system for offsets.
//!
//! offsets uses TOML configuration files named `.offsets.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.offsets.toml` files found, then loading `~/.offsets.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawAnalyzerSettings, RawConfig, RawOutputSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};

/// Top-level merged configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Text analysis settings.
    pub analyzer: AnalyzerSettings,
    /// Synonyms reported as co-located tokens, keyed by word.
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Output settings.
    pub output: OutputSettings,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.offsets.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }
}

/// Text analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    /// Stemming language, or "none" to disable stemming.
    pub stemmer: String,
    /// Tokens longer than this many bytes are dropped.
    pub max_token_length: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            stemmer: "english".to_string(),
            max_token_length: 40,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Output format.
    pub format: OutputFormat,
}

/// How match offsets are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space-separated offset triples.
    #[default]
    Text,
    /// Structured JSON records.
    Json,
}
