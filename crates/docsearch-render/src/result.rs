//! Rendered search results and their just-the-docs markup.

use docsearch_corpus::DocumentRecord;
use docsearch_index::SearchHit;
use serde::Serialize;

use crate::{
    escape::escape_html,
    excerpt::{ELLIPSIS_AFTER, ELLIPSIS_BEFORE, build_previews},
    highlight::{Segment, segments_to_html, splice_highlights},
};

/// Icon shown before every result title.
const DOC_ICON: &str =
    r##"<svg viewBox="0 0 24 24" class="search-result-icon"><use xlink:href="#svg-doc"></use></svg>"##;

/// Text of the no-results notice.
pub const NO_RESULTS_TEXT: &str = "No results found";

/// One content preview of a rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPreview {
    /// Show `"... "` before the text.
    pub ellipsis_before: bool,
    /// Preview text with highlighted matches.
    pub segments: Vec<Segment>,
    /// Show `" ..."` after the text.
    pub ellipsis_after: bool,
}

impl RenderedPreview {
    /// Plain text of the preview including ellipses.
    pub fn text(&self) -> String {
        let mut text = String::new();
        if self.ellipsis_before {
            text.push_str(ELLIPSIS_BEFORE);
        }
        for segment in &self.segments {
            text.push_str(&segment.text);
        }
        if self.ellipsis_after {
            text.push_str(ELLIPSIS_AFTER);
        }
        text
    }
}

/// A search hit ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    /// Corpus key.
    pub id: String,
    /// Link target.
    pub href: String,
    /// Page title line.
    pub doc_title: Vec<Segment>,
    /// Section title line, present when it differs from the page title.
    pub section: Option<Vec<Segment>>,
    /// Content previews, in content order.
    pub previews: Vec<RenderedPreview>,
    /// Site-relative URL shown under the title.
    pub relative_url: String,
    /// Relevance score.
    pub score: f32,
}

/// Renders one hit against its record.
///
/// Title matches are spliced into the section line when the record has a distinct section,
/// otherwise into the page title line. At most `max_previews` previews are kept.
pub fn render_result(
    record: &DocumentRecord,
    hit: &SearchHit,
    max_previews: usize,
) -> RenderedResult {
    let mut title_spans = hit.matches.title.clone();
    title_spans.sort_by_key(|span| span.start);

    let title = &record.section_title;
    let title_line = if title_spans.is_empty() {
        vec![Segment::plain(title.as_str())]
    } else {
        splice_highlights(title, 0, title.len(), &title_spans)
    };

    let (doc_title, section) = if record.has_distinct_section() {
        (vec![Segment::plain(record.parent_title.as_str())], Some(title_line))
    } else {
        (title_line, None)
    };

    let previews = build_previews(&record.content, &hit.matches.content, max_previews)
        .into_iter()
        .map(|preview| RenderedPreview {
            ellipsis_before: preview.window.ellipsis_before,
            segments: preview.segments(&record.content),
            ellipsis_after: preview.window.ellipsis_after,
        })
        .collect();

    RenderedResult {
        id: record.id.clone(),
        href: record.url.clone(),
        doc_title,
        section,
        previews,
        relative_url: record.relative_url.clone(),
        score: hit.score,
    }
}

impl RenderedResult {
    /// Renders the result as a `search-results-list-item`.
    ///
    /// `active` adds the `active` class used for keyboard selection.
    pub fn to_html(&self, active: bool) -> String {
        let link_class = if active {
            "search-result active"
        } else {
            "search-result"
        };
        let doc_class = if self.section.is_some() {
            "search-result-doc search-result-doc-parent"
        } else {
            "search-result-doc"
        };

        let mut html = format!(
            "<li class=\"search-results-list-item\"><a class=\"{link_class}\" href=\"{}\">",
            escape_html(&self.href)
        );
        html.push_str("<div class=\"search-result-title\">");
        html.push_str(&format!(
            "<div class=\"{doc_class}\">{DOC_ICON}<div class=\"search-result-doc-title\">{}</div></div>",
            segments_to_html(&self.doc_title)
        ));
        if let Some(section) = &self.section {
            html.push_str(&format!(
                "<div class=\"search-result-section\">{}</div>",
                segments_to_html(section)
            ));
        }
        html.push_str(&format!(
            "<span class=\"search-result-rel-url\">{}</span></div>",
            escape_html(&self.relative_url)
        ));

        if !self.previews.is_empty() {
            html.push_str("<div class=\"search-result-previews\">");
            for preview in &self.previews {
                html.push_str("<div class=\"search-result-preview\">");
                if preview.ellipsis_before {
                    html.push_str(ELLIPSIS_BEFORE);
                }
                html.push_str(&segments_to_html(&preview.segments));
                if preview.ellipsis_after {
                    html.push_str(ELLIPSIS_AFTER);
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }

        html.push_str("</a></li>");
        html
    }
}

/// Renders a list of results, marking `active` as keyboard-selected.
pub fn results_list_html(results: &[RenderedResult], active: Option<usize>) -> String {
    let items: String = results
        .iter()
        .enumerate()
        .map(|(i, result)| result.to_html(active == Some(i)))
        .collect();
    format!("<ul class=\"search-results-list\">{items}</ul>")
}

/// Markup shown when a non-empty query matched nothing.
pub fn no_results_html() -> String {
    format!("<div class=\"search-no-result\">{NO_RESULTS_TEXT}</div>")
}
