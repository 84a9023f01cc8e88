//! Implementation of `docsearch theme`.

use std::process::ExitCode;

use docsearch_render::Theme;

use crate::cli::{args::ThemeCommand, context::CommandContext};

/// Prints the theme named by a stylesheet href, or the href that switches to another theme.
///
/// New hrefs are built under the configured `site.stylesheet_base`.
pub fn run(ctx: &CommandContext, cmd: &ThemeCommand) -> ExitCode {
    let current = match Theme::from_href(&cmd.href) {
        Ok(theme) => theme,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cmd.set {
        Some(theme) => println!("{}", theme.href(&ctx.config.site.stylesheet_base)),
        None => println!("{current}"),
    }
    ExitCode::SUCCESS
}
