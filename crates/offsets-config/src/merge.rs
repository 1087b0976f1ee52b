//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and validating values.

use std::path::PathBuf;

use crate::{
    AnalyzerSettings, Config, ConfigError, OutputSettings,
    parse::{RawAnalyzerSettings, RawConfig},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to the
/// working directory), lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - Synonyms: merged by word, first definition of each word wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.analyzer {
            apply_analyzer(&mut config.analyzer, raw, parsed)?;
        }
        if let Some(synonyms) = &parsed.config.synonyms {
            for (word, alternatives) in synonyms {
                config.synonyms.insert(word.clone(), alternatives.clone());
            }
        }
        if let Some(format) = parsed.config.output.as_ref().and_then(|o| o.format) {
            config.output = OutputSettings { format };
        }
    }

    Ok(config)
}

/// Applies raw analyzer settings to `result`, overwriting any present values.
fn apply_analyzer(
    result: &mut AnalyzerSettings,
    raw: &RawAnalyzerSettings,
    parsed: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(stemmer) = &raw.stemmer {
        if stemmer.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                path: parsed.path.clone(),
                setting: "analyzer.stemmer",
                message: "must name a language or \"none\"".to_string(),
            });
        }
        result.stemmer = stemmer.clone();
    }
    if let Some(length) = raw.max_token_length {
        if length == 0 {
            return Err(ConfigError::InvalidValue {
                path: parsed.path.clone(),
                setting: "analyzer.max_token_length",
                message: "must be greater than zero".to_string(),
            });
        }
        result.max_token_length = length;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{OutputFormat, parse_config_str};

    /// Parses `toml` as if it were read from `path`.
    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn empty_list_gives_defaults() {
        let config = merge_configs(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.analyzer.stemmer, "english");
        assert_eq!(config.analyzer.max_token_length, 40);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn closest_scalar_wins() {
        let config = merge_configs(&[
            parsed("/p/a/.offsets.toml", "[analyzer]\nstemmer = \"german\"\n"),
            parsed(
                "/p/.offsets.toml",
                "[analyzer]\nstemmer = \"french\"\nmax_token_length = 12\n",
            ),
        ])
        .unwrap();
        assert_eq!(config.analyzer.stemmer, "german");
        assert_eq!(config.analyzer.max_token_length, 12);
    }

    #[test]
    fn synonyms_merge_by_word() {
        let config = merge_configs(&[
            parsed("/p/a/.offsets.toml", "[synonyms]\nquick = \"fast\"\n"),
            parsed(
                "/p/.offsets.toml",
                "[synonyms]\nquick = [\"rapid\"]\ncolor = \"colour\"\n",
            ),
        ])
        .unwrap();
        assert_eq!(config.synonyms["quick"], vec!["fast"]);
        assert_eq!(config.synonyms["color"], vec!["colour"]);
    }

    #[test]
    fn output_format_from_lower_precedence_survives() {
        let config = merge_configs(&[
            parsed("/p/a/.offsets.toml", "[output]\n"),
            parsed("/p/.offsets.toml", "[output]\nformat = \"json\"\n"),
        ])
        .unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn zero_token_length_is_rejected() {
        let err = merge_configs(&[parsed(
            "/p/.offsets.toml",
            "[analyzer]\nmax_token_length = 0\n",
        )])
        .unwrap_err();
        assert!(err.to_string().contains("analyzer.max_token_length"));
    }

    #[test]
    fn blank_stemmer_is_rejected() {
        let result = merge_configs(&[parsed("/p/.offsets.toml", "[analyzer]\nstemmer = \" \"\n")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
