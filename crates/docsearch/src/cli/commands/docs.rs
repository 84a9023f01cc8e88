//! Implementation of `docsearch docs`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use docsearch_corpus::Corpus;

use crate::cli::{
    args::DocsCommand,
    context::CommandContext,
    output::{dim, print_json},
};

/// Lists the corpus records with their rewritten links.
pub fn run(ctx: &CommandContext, cmd: &DocsCommand) -> ExitCode {
    let corpus = match ctx.load_corpus(&cmd.site) {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    if cmd.json {
        return print_json(&corpus.records());
    }

    if corpus.is_empty() {
        println!("{}", dim("Corpus is empty."));
        return ExitCode::SUCCESS;
    }

    println!("{}", records_table(&corpus));
    println!("{}", dim(&format!("{} records", corpus.len())));
    ExitCode::SUCCESS
}

/// Builds the record table.
fn records_table(corpus: &Corpus) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Id", "Page", "Section", "Link"]);

    for record in corpus.iter() {
        let section = if record.has_distinct_section() {
            record.section_title.as_str()
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(&record.parent_title),
            Cell::new(section),
            Cell::new(&record.url),
        ]);
    }
    table
}
