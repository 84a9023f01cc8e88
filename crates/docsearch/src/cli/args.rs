//! Clap argument definitions for the `docsearch` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docsearch_render::Theme;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Search a just-the-docs site corpus from the terminal")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags selecting the corpus and the page hosting the search box.
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Path of the page hosting the search box; result links are made relative to it
    /// [default: /<repo_name>/docs/index.html]
    #[arg(long)]
    pub page: Option<String>,

    /// Corpus JSON file to search instead of the configured or embedded one
    #[arg(long)]
    pub corpus: Option<PathBuf>,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output the results container markup
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Resolved output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Styled terminal text.
    Terminal,
    /// Site markup.
    Html,
    /// Pretty-printed JSON.
    Json,
}

impl OutputArgs {
    /// Returns the selected output mode.
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.html {
            OutputMode::Html
        } else {
            OutputMode::Terminal
        }
    }
}

/// Arguments for `docsearch search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query words, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    #[command(flatten)]
    /// Corpus and page selection.
    pub site: SiteArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    /// Maximum results to show [default: all]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `docsearch session`.
#[derive(Args, Debug, Clone)]
pub struct SessionCommand {
    #[command(flatten)]
    /// Corpus and page selection.
    pub site: SiteArgs,

    /// Print the results container markup after each event
    #[arg(long)]
    pub html: bool,
}

/// Arguments for `docsearch docs`.
#[derive(Args, Debug, Clone)]
pub struct DocsCommand {
    #[command(flatten)]
    /// Corpus and page selection.
    pub site: SiteArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `docsearch theme`.
#[derive(Args, Debug, Clone)]
pub struct ThemeCommand {
    /// Current stylesheet href, e.g. .../just-the-docs-dark.css
    pub href: String,

    /// Print the href that switches to this theme (default, light, dark)
    #[arg(long)]
    pub set: Option<Theme>,
}

/// Arguments for `docsearch init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `docsearch` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the staged search and print the results
    Search(SearchCommand),

    /// Drive a search box from stdin events and print the view after each one
    Session(SessionCommand),

    /// List the corpus records
    Docs(DocsCommand),

    /// Read the theme from a stylesheet href, or build the href for another theme
    Theme(ThemeCommand),

    /// Initialize docsearch configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and check that the corpus indexes
    Check,
}

/// Parses CLI arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
