//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

pub use docsearch_highlight::{active, dim, header, link, matched, subheader, warning};
use docsearch_index::SearchStage;
use docsearch_render::{
    NO_RESULTS_TEXT, RenderedPreview, RenderedResult, ResultsPane, Segment, SessionView,
};
use serde::Serialize;

/// JSON output for `docsearch search`.
#[derive(Serialize)]
pub struct JsonSearchOutput<'a> {
    /// The query as typed.
    pub query: &'a str,
    /// Stage that produced the results.
    pub stage: SearchStage,
    /// Number of documents the stage matched, before `--limit` truncation.
    pub total_matches: usize,
    /// Results in rank order.
    pub results: &'a [RenderedResult],
}

/// Pretty-prints `value` as JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Joins segments, styling the highlighted ones.
fn styled_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.highlighted {
                matched(&segment.text)
            } else {
                segment.text.clone()
            }
        })
        .collect()
}

/// Formats one preview line with its ellipses.
fn format_preview(preview: &RenderedPreview) -> String {
    let mut line = String::new();
    if preview.ellipsis_before {
        line.push_str(&dim("..."));
        line.push(' ');
    }
    line.push_str(&styled_segments(&preview.segments));
    if preview.ellipsis_after {
        line.push(' ');
        line.push_str(&dim("..."));
    }
    line
}

/// Formats one result as a block of terminal lines.
///
/// The selected result is marked in the gutter.
pub fn format_result(result: &RenderedResult, selected: bool) -> String {
    let gutter = if selected { active(">") } else { String::from(" ") };

    let mut title = header(&styled_segments(&result.doc_title));
    if let Some(section) = &result.section {
        title.push_str(&dim(" > "));
        title.push_str(&styled_segments(section));
    }

    let mut out = format!("{gutter} {title}\n");
    out.push_str(&format!(
        "  {} {}\n",
        dim(&result.relative_url),
        link(&result.href)
    ));
    for preview in &result.previews {
        out.push_str(&format!("    {}\n", format_preview(preview)));
    }
    out
}

/// Formats the stage line shown above results.
pub fn format_stage(stage: SearchStage, count: usize) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    dim(&format!("{count} {noun} ({stage} match)"))
}

/// Formats a results list, or the no-results message.
pub fn format_results(results: &[RenderedResult], selected: Option<usize>) -> String {
    if results.is_empty() {
        return format!("{}\n", dim(NO_RESULTS_TEXT));
    }
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format_result(result, selected == Some(i)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the whole search box state.
pub fn format_view(view: &SessionView) -> String {
    let mut out = format!("{} {}\n", subheader("search:"), view.input);
    if !view.search_active {
        out.push_str(&dim("(search hidden)"));
        out.push('\n');
        return out;
    }

    match &view.results {
        ResultsPane::Empty => {}
        ResultsPane::NoResults => out.push_str(&format_results(&[], None)),
        ResultsPane::List(results) => {
            if let Some(stage) = view.stage {
                out.push_str(&format_stage(stage, results.len()));
                out.push('\n');
            }
            out.push_str(&format_results(results, view.active));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Strips ANSI escape sequences from a string.
    fn strip_ansi(input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(ch) = chars.next() {
            if ch == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                output.push(ch);
            }
        }
        output
    }

    fn sample() -> RenderedResult {
        RenderedResult {
            id: String::from("3"),
            href: String::from("./guide.html#wiring"),
            doc_title: vec![Segment::plain("Guide")],
            section: Some(vec![Segment::highlighted("Wiring")]),
            previews: vec![RenderedPreview {
                ellipsis_before: true,
                segments: vec![Segment::plain("connect the "), Segment::highlighted("wiring")],
                ellipsis_after: false,
            }],
            relative_url: String::from("/guide.html#wiring"),
            score: 1.5,
        }
    }

    #[test]
    fn result_block_lists_title_link_and_previews() {
        let text = strip_ansi(&format_result(&sample(), false));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "  Guide > Wiring");
        assert_eq!(lines[1], "  /guide.html#wiring ./guide.html#wiring");
        assert_eq!(lines[2], "    ... connect the wiring");
    }

    #[test]
    fn highlighted_segments_are_styled() {
        let raw = format_result(&sample(), false);
        assert!(raw.contains(&matched("wiring")));
    }

    #[test]
    fn selected_result_is_marked() {
        let text = strip_ansi(&format_result(&sample(), true));
        assert!(text.starts_with("> Guide"));
    }

    #[test]
    fn empty_results_show_message() {
        assert_eq!(strip_ansi(&format_results(&[], None)), "No results found\n");
    }

    #[test]
    fn stage_line_counts_results() {
        assert_eq!(
            strip_ansi(&format_stage(SearchStage::Fuzzy { distance: 2 }, 1)),
            "1 result (fuzzy (distance 2) match)"
        );
        assert_eq!(
            strip_ansi(&format_stage(SearchStage::Exact, 4)),
            "4 results (exact match)"
        );
    }

    #[test]
    fn hidden_view_says_so() {
        let view = SessionView::default();
        let text = strip_ansi(&format_view(&view));
        assert!(text.contains("(search hidden)"));
    }

    #[test]
    fn active_view_lists_results() {
        let view = SessionView {
            input: String::from("wiring"),
            search_active: true,
            results: ResultsPane::List(vec![sample()]),
            active: Some(0),
            stage: Some(SearchStage::Wildcard),
        };
        let text = strip_ansi(&format_view(&view));
        assert!(text.starts_with("search: wiring\n"));
        assert!(text.contains("1 result (wildcard match)"));
        assert!(text.contains("> Guide > Wiring"));
    }
}
