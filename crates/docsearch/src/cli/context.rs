//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use docsearch_config::Config;
use docsearch_corpus::{Corpus, SiteLayout};
use docsearch_index::{IndexOptions, SearchIndex};
use docsearch_render::RenderOptions;
use log::debug;

use crate::cli::args::SiteArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

/// A corpus with rewritten links and the index built over it.
pub struct LoadedSite {
    /// Records with page-relative URLs.
    pub corpus: Corpus,
    /// In-memory index over `corpus`.
    pub index: SearchIndex,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for commands like `init` that should work even when an existing config file
    /// is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Site layout from the `[site]` settings.
    pub fn site_layout(&self) -> SiteLayout {
        let site = &self.config.site;
        SiteLayout::new(&site.base_url, &site.repo_name, &site.home_index_title)
    }

    /// Page assumed to host the search box when `--page` is absent.
    pub fn default_page(&self) -> String {
        format!("/{}/docs/index.html", self.config.site.repo_name)
    }

    /// Render options from the `[render]` settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::from_config(&self.config)
    }

    /// Loads the corpus with its links rewritten for the hosting page.
    pub fn load_corpus(&self, args: &SiteArgs) -> Result<Corpus, ExitCode> {
        let corpus = self.read_corpus(args.corpus.as_deref())?;
        let page = args.page.clone().unwrap_or_else(|| self.default_page());
        let rewriter = self.site_layout().rewriter_for_page(&page);
        debug!("page {page} is at depth {}", rewriter.depth());
        Ok(corpus.with_rewritten_urls(&rewriter))
    }

    /// Loads the corpus as [`Self::load_corpus`] does and indexes it.
    pub fn load_site(&self, args: &SiteArgs) -> Result<LoadedSite, ExitCode> {
        let corpus = self.load_corpus(args)?;
        let options = IndexOptions::from_config(&self.config);
        let index = SearchIndex::build(&corpus, &options).map_err(|e| {
            eprintln!("error: failed to build index: {e}");
            ExitCode::FAILURE
        })?;

        Ok(LoadedSite { corpus, index })
    }

    /// Loads the corpus named by `--corpus`, the configuration, or the embedded one.
    fn read_corpus(&self, override_path: Option<&Path>) -> Result<Corpus, ExitCode> {
        let path = override_path
            .map(|p| self.cwd.join(p))
            .or_else(|| self.config.site.corpus.clone());

        let loaded = match &path {
            Some(path) => Corpus::from_path(path),
            None => Corpus::embedded(),
        };
        loaded.map_err(|e| {
            eprintln!("error: failed to load corpus: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CommandContext {
        CommandContext {
            cwd: PathBuf::from("/"),
            config: Config::default(),
        }
    }

    #[test]
    fn default_page_is_documentation_root() {
        let ctx = context();
        assert_eq!(ctx.default_page(), "/mc_apps_sam_rh71/docs/index.html");
        let rewriter = ctx.site_layout().rewriter_for_page(&ctx.default_page());
        assert_eq!(rewriter.relative_prefix(), "./");
    }

    #[test]
    fn embedded_site_loads() {
        let site = context().load_site(&SiteArgs::default()).unwrap();
        assert_eq!(site.index.num_docs(), site.corpus.len() as u64);
        let record = site.corpus.get("0").unwrap();
        assert_eq!(record.url, "./apps/docs/hardware_setup.html");
    }

    #[test]
    fn page_flag_changes_link_depth() {
        let args = SiteArgs {
            page: Some(String::from("/mc_apps_sam_rh71/docs/apps/docs/x.html")),
            corpus: None,
        };
        let site = context().load_site(&args).unwrap();
        assert_eq!(
            site.corpus.get("0").unwrap().url,
            "../../apps/docs/hardware_setup.html"
        );
    }

    #[test]
    fn missing_corpus_is_a_failure() {
        let args = SiteArgs {
            page: None,
            corpus: Some(PathBuf::from("/nonexistent/search-data.json")),
        };
        assert!(context().load_site(&args).is_err());
    }
}
