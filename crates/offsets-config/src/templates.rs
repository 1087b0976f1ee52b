//! Configuration templates for `offsets init`.
//!
//! The template is stored as a valid TOML file and returned as a commented-out example.

/// Configuration template (valid TOML).
const TEMPLATE: &str = include_str!("../templates/config.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
///
/// The global file may not set `root`, so that line is left out.
pub fn global_template() -> String {
    let without_root: String = TEMPLATE
        .lines()
        .filter(|line| !line.starts_with("root ") && !line.contains("Stop discovery"))
        .map(|line| format!("{line}\n"))
        .collect();
    comment_template(&without_root)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty lines get a
/// "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse_config_str;

    #[test]
    fn template_parses_as_valid_toml() {
        let config = parse_config_str(TEMPLATE, Path::new("template.toml")).unwrap();
        assert!(config.analyzer.is_some());
        assert!(config.synonyms.is_some());
    }

    #[test]
    fn local_template_is_fully_commented() {
        for line in local_template().lines() {
            assert!(line.is_empty() || line.starts_with('#'), "uncommented: {line}");
        }
    }

    #[test]
    fn commented_template_parses_as_empty() {
        let config = parse_config_str(&local_template(), Path::new("t.toml")).unwrap();
        assert!(config.analyzer.is_none());
    }

    #[test]
    fn global_template_omits_root() {
        let global = global_template();
        assert!(!global.contains("root ="));
        assert!(global.contains("[analyzer]"));
    }

    #[test]
    fn comment_template_preserves_existing_comments() {
        let out = comment_template("# note\nkey = \"value\"\n\n");
        assert_eq!(out, "# note\n# key = \"value\"\n\n");
    }
}
