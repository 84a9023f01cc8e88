//! Implementation of `docsearch check`.

use std::process::ExitCode;

use docsearch_config::{ConfigWarning, discover_config_files};

use crate::cli::{
    args::SiteArgs,
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Reports config files, validation warnings, and whether the corpus loads and indexes.
///
/// Exits with failure when the corpus can't be indexed or any warning is found.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    } else {
        for path in &config_files {
            println!("   {}", path.display());
        }
    }
    println!();

    println!("{}", subheader("Corpus:"));
    let source = ctx
        .config
        .site
        .corpus
        .as_ref()
        .map_or_else(|| String::from("embedded"), |p| p.display().to_string());
    let indexed = match ctx.load_site(&SiteArgs::default()) {
        Ok(site) => {
            println!(
                "   {} records, {} indexed {}",
                site.corpus.len(),
                site.index.num_docs(),
                dim(&format!("({source})"))
            );
            true
        }
        Err(_) => {
            println!("   {} {}", warning("unavailable"), dim(&format!("({source})")));
            false
        }
    };
    println!();

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        if !indexed {
            return ExitCode::FAILURE;
        }
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings.iter().filter_map(hint).collect();
    hints.sort_unstable();
    hints.dedup();
    for hint in hints {
        println!("{}", dim(&format!("Hint: {hint}")));
    }
}

/// Returns the hint for one warning, if there is one.
fn hint(warning: &ConfigWarning) -> Option<&'static str> {
    match warning {
        ConfigWarning::CorpusMissing { .. } => {
            Some("set site.corpus relative to the .docsearch.toml that names it")
        }
        ConfigWarning::NonPositiveBoost { .. } | ConfigWarning::ContentOutranksTitle { .. } => {
            Some("the defaults are title_boost = 200, content_boost = 2, url_boost = 1")
        }
        ConfigWarning::BaseUrlWithoutSlash { .. } => Some("end site.base_url with '/'"),
        ConfigWarning::ZeroBatchSize | ConfigWarning::NoPreviews => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_cover_fixable_warnings() {
        assert!(hint(&ConfigWarning::ZeroBatchSize).is_none());
        assert!(
            hint(&ConfigWarning::BaseUrlWithoutSlash {
                base_url: String::from("http://x")
            })
            .is_some()
        );
    }
}
