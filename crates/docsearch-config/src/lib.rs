//! Configuration system for docsearch.
//!
//! docsearch uses TOML configuration files named `.docsearch.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.docsearch.toml` files found, then loading `~/.docsearch.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawRenderSettings, RawSearchSettings, RawSiteSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::config_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for docsearch.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.docsearch.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Site layout settings used for URL rewriting and theming.
    pub site: SiteSettings,
    /// Index and query settings.
    pub search: SearchSettings,
    /// Result rendering settings.
    pub render: RenderSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.docsearch.toml` files.
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
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A corpus file that doesn't exist
    /// - Field boosts that are not positive or that rank content above titles
    /// - Render settings that would never show a result
    /// - A base URL without a trailing slash
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            site: self.site.clone(),
            search: self.search.clone(),
            render: self.render.clone(),
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::Serialize)
    }
}

/// Site layout settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Origin the site was generated against, with a trailing slash.
    pub base_url: String,
    /// Repository name; the path segment the documentation root hangs off.
    pub repo_name: String,
    /// Section title of the site's home record, which gets `index.html` appended.
    pub home_index_title: String,
    /// URL prefix of the theme stylesheets.
    pub stylesheet_base: String,
    /// Optional corpus file replacing the embedded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus: Option<PathBuf>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:4000/"),
            repo_name: String::from("mc_apps_sam_rh71"),
            home_index_title: String::from(
                "Microchip MPLAB® Harmony 3 Motor Control Application Examples for SAMRH71 family",
            ),
            stylesheet_base: String::from("http://localhost:4000/mc_apps_sam_rh71/assets/css/"),
            corpus: None,
        }
    }
}

/// Index and query settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Stemming language.
    pub stemmer: String,
    /// Score multiplier for title matches.
    pub title_boost: f32,
    /// Score multiplier for content matches.
    pub content_boost: f32,
    /// Score multiplier for url matches.
    pub url_boost: f32,
    /// Extra multiplier applied to exact-term clauses.
    pub exact_boost: f32,
    /// Tokens this long or longer are skipped by fuzzy matching.
    pub max_fuzzy_token_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            stemmer: String::from("english"),
            title_boost: 200.0,
            content_boost: 2.0,
            url_boost: 1.0,
            exact_boost: 10.0,
            max_fuzzy_token_len: 20,
        }
    }
}

/// Result rendering settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Results appended per render tick.
    pub batch_size: usize,
    /// Delay between render ticks in milliseconds.
    pub batch_millis: u64,
    /// Maximum content previews shown per result.
    pub max_previews: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_millis: 100,
            max_previews: 3,
        }
    }
}

/// Serializable view of the effective settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Site settings.
    site: SiteSettings,
    /// Search settings.
    search: SearchSettings,
    /// Render settings.
    render: RenderSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_layout() {
        let config = Config::default();
        assert_eq!(config.site.base_url, "http://localhost:4000/");
        assert_eq!(config.site.repo_name, "mc_apps_sam_rh71");
        assert_eq!(config.search.title_boost, 200.0);
        assert_eq!(config.search.content_boost, 2.0);
        assert_eq!(config.search.url_boost, 1.0);
        assert_eq!(config.render.batch_size, 10);
        assert_eq!(config.render.batch_millis, 100);
        assert_eq!(config.render.max_previews, 3);
    }

    #[test]
    fn settings_to_toml_round_trips_sections() {
        let toml = Config::default().settings_to_toml().unwrap();
        assert!(toml.contains("[site]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[render]"));
        assert!(toml.contains("stemmer = \"english\""));
        assert!(!toml.contains("corpus"));

        let raw = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(raw.render.unwrap().batch_size, Some(10));
    }

    #[test]
    fn load_from_no_files_is_default() {
        let config = Config::load_from_files(&[]).unwrap();
        assert!(config.config_root.is_none());
        assert_eq!(config.search.stemmer, "english");
    }
}
