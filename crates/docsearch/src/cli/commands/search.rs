//! Implementation of `docsearch search`.

use std::process::ExitCode;

use docsearch_render::{RenderedResult, no_results_html, render_result, results_list_html};

use crate::cli::{
    args::{OutputMode, SearchCommand},
    context::CommandContext,
    output::{JsonSearchOutput, format_results, format_stage, print_json},
};

/// Runs the staged search and prints the rendered results.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let site = match ctx.load_site(&cmd.site) {
        Ok(site) => site,
        Err(code) => return code,
    };

    let query = cmd.query.join(" ");
    let outcome = match site.index.search(&query) {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            eprintln!("error: query is empty");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let max_previews = ctx.render_options().max_previews;
    let results: Vec<RenderedResult> = outcome
        .hits
        .iter()
        .take(cmd.limit.unwrap_or(usize::MAX))
        .filter_map(|hit| {
            site.corpus
                .get(&hit.id)
                .map(|record| render_result(record, hit, max_previews))
        })
        .collect();

    match cmd.output.mode() {
        OutputMode::Json => print_json(&JsonSearchOutput {
            query: &query,
            stage: outcome.stage,
            total_matches: outcome.hits.len(),
            results: &results,
        }),
        OutputMode::Html => {
            if results.is_empty() {
                println!("{}", no_results_html());
            } else {
                println!("{}", results_list_html(&results, None));
            }
            ExitCode::SUCCESS
        }
        OutputMode::Terminal => {
            if !results.is_empty() {
                println!("{}", format_stage(outcome.stage, outcome.hits.len()));
            }
            print!("{}", format_results(&results, None));
            ExitCode::SUCCESS
        }
    }
}
