//! Configuration template for `docsearch init`.
//!
//! The template is stored as a valid TOML file and returned as a commented-out
//! example configuration.

/// Configuration template (valid TOML).
const TEMPLATE: &str = include_str!("../templates/config.toml");

/// Returns the configuration template as a commented-out example.
pub fn config_template() -> String {
    comment_template(TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
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
        let result = parse_config_str(TEMPLATE, Path::new("template.toml"));
        assert!(result.is_ok(), "template failed to parse: {result:?}");
    }

    #[test]
    fn commented_template_parses_as_empty() {
        let config = parse_config_str(&config_template(), Path::new("t.toml")).unwrap();
        assert!(config.site.is_none());
        assert!(config.search.is_none());
        assert!(config.render.is_none());
    }

    #[test]
    fn comment_template_keeps_blank_lines_and_comments() {
        let out = comment_template("# note\n\n[site]\nrepo_name = \"x\"\n");
        assert_eq!(out, "# note\n\n# [site]\n# repo_name = \"x\"\n");
    }
}
