//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving the corpus path.

use std::path::{Path, PathBuf};

use crate::{
    Config, RenderSettings, SearchSettings, SiteSettings,
    parse::{RawConfig, RawRenderSettings, RawSearchSettings, RawSiteSettings},
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
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every scalar the first defined value wins.
/// A relative `corpus` path is resolved against the directory of the file that defines it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let mut site = SiteSettings::default();
    let mut search = SearchSettings::default();
    let mut render = RenderSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let base = parsed.path.parent().unwrap_or_else(|| Path::new("."));
        if let Some(ref raw) = parsed.config.site {
            apply_raw_site(&mut site, raw, base);
        }
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(ref raw) = parsed.config.render {
            apply_raw_render(&mut render, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Config {
        site,
        search,
        render,
        config_root,
    }
}

/// Applies raw site settings to result.
fn apply_raw_site(result: &mut SiteSettings, raw: &RawSiteSettings, base: &Path) {
    if let Some(ref v) = raw.base_url {
        result.base_url = v.clone();
    }
    if let Some(ref v) = raw.repo_name {
        result.repo_name = v.clone();
    }
    if let Some(ref v) = raw.home_index_title {
        result.home_index_title = v.clone();
    }
    if let Some(ref v) = raw.stylesheet_base {
        result.stylesheet_base = v.clone();
    }
    if let Some(ref v) = raw.corpus {
        result.corpus = Some(base.join(v));
    }
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(ref v) = raw.stemmer {
        result.stemmer = v.clone();
    }
    if let Some(v) = raw.title_boost {
        result.title_boost = v;
    }
    if let Some(v) = raw.content_boost {
        result.content_boost = v;
    }
    if let Some(v) = raw.url_boost {
        result.url_boost = v;
    }
    if let Some(v) = raw.exact_boost {
        result.exact_boost = v;
    }
    if let Some(v) = raw.max_fuzzy_token_len {
        result.max_fuzzy_token_len = v;
    }
}

/// Applies raw render settings to result.
fn apply_raw_render(result: &mut RenderSettings, raw: &RawRenderSettings) {
    if let Some(v) = raw.batch_size {
        result.batch_size = v;
    }
    if let Some(v) = raw.batch_millis {
        result.batch_millis = v;
    }
    if let Some(v) = raw.max_previews {
        result.max_previews = v;
    }
}
