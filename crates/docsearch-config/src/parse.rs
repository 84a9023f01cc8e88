//! Configuration file parsing.
//!
//! Parses individual `.docsearch.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Site settings section.
    pub site: Option<RawSiteSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Render settings section.
    pub render: Option<RawRenderSettings>,
}

/// Raw site settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteSettings {
    /// Origin the site was generated against.
    pub base_url: Option<String>,
    /// Repository name segment.
    pub repo_name: Option<String>,
    /// Section title of the home record.
    pub home_index_title: Option<String>,
    /// URL prefix of the theme stylesheets.
    pub stylesheet_base: Option<String>,
    /// Corpus file, relative to the config file's directory.
    pub corpus: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Stemming language.
    pub stemmer: Option<String>,
    /// Title field boost.
    pub title_boost: Option<f32>,
    /// Content field boost.
    pub content_boost: Option<f32>,
    /// Url field boost.
    pub url_boost: Option<f32>,
    /// Exact-term clause boost.
    pub exact_boost: Option<f32>,
    /// Fuzzy matching skips tokens at least this long.
    pub max_fuzzy_token_len: Option<usize>,
}

/// Raw render settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRenderSettings {
    /// Results appended per tick.
    pub batch_size: Option<usize>,
    /// Milliseconds between ticks.
    pub batch_millis: Option<u64>,
    /// Previews shown per result.
    pub max_previews: Option<usize>,
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
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
