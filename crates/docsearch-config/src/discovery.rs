//! Configuration file discovery.
//!
//! Discovers `.docsearch.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.docsearch.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".docsearch.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global last. Discovery stops
/// at a config file that sets `root = true`, and the global file is skipped in that case.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.docsearch.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn finds_nothing_in_empty_tree() {
        let dir = TestDir::new();
        let nested = dir.create_dir("a/b");
        let found: Vec<_> = discover_config_files(&nested)
            .into_iter()
            .filter(|p| p.starts_with(dir.path()))
            .collect();
        assert!(found.is_empty());
    }

    #[test]
    fn closest_config_comes_first() {
        let dir = TestDir::new();
        let outer = dir.create_config("");
        let inner = dir.create_config("site/docs");
        let found: Vec<_> = discover_config_files(&dir.path().join("site/docs"))
            .into_iter()
            .filter(|p| p.starts_with(dir.path()))
            .collect();
        assert_eq!(found, vec![inner, outer]);
    }

    #[test]
    fn root_config_stops_discovery() {
        let dir = TestDir::new();
        dir.create_config("");
        let root = dir.create_config_with_content("site", "root = true\n");
        let found = discover_config_files(&dir.path().join("site"));
        assert_eq!(found, vec![root]);
    }
}
