//! Content previews around matched tokens.
//!
//! Each content match gets a window grown outward word by word: up to five words back and
//! up to ten words forward. A window stops early at a sentence boundary (`". "`) or at the
//! edge of the content; only a side that ran out of steps gets an ellipsis. Windows are
//! then merged in match order whenever they touch.
//!
//! Offsets are byte offsets. Every boundary the walk lands on is next to an ASCII space or
//! dot, so windows always fall on character boundaries.

use docsearch_index::Span;
use serde::Serialize;

use crate::highlight::{Segment, splice_highlights};

/// Words walked backwards from a match.
const BACKWARD_STEPS: usize = 5;

/// Words walked forwards from a match.
const FORWARD_STEPS: usize = 10;

/// Marker prepended to a preview cut mid-sentence.
pub const ELLIPSIS_BEFORE: &str = "... ";

/// Marker appended to a preview cut mid-sentence.
pub const ELLIPSIS_AFTER: &str = " ...";

/// Byte range of content shown around one or more matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewWindow {
    /// First byte shown.
    pub start: usize,
    /// One past the last byte shown.
    pub end: usize,
    /// True when the window was cut before the start of its sentence.
    pub ellipsis_before: bool,
    /// True when the window was cut before the end of its sentence.
    pub ellipsis_after: bool,
}

/// A window with the matches it highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Shown range.
    pub window: PreviewWindow,
    /// Matches inside the window, sorted by start.
    pub highlights: Vec<Span>,
}

impl Preview {
    /// Splits the window's text into plain and highlighted runs.
    pub fn segments(&self, content: &str) -> Vec<Segment> {
        splice_highlights(content, self.window.start, self.window.end, &self.highlights)
    }
}

/// Last occurrence of `needle` starting at or before `from`.
///
/// A negative `from` only considers position zero.
fn last_index_of(haystack: &[u8], needle: &[u8], from: isize) -> Option<usize> {
    let from = usize::try_from(from).unwrap_or(0);
    let limit = from.saturating_add(needle.len()).min(haystack.len());
    haystack[..limit]
        .windows(needle.len())
        .rposition(|window| window == needle)
}

/// First occurrence of `needle` starting at or after `from`.
fn index_of(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|at| at + from)
}

/// Computes the preview window around one content match.
pub fn preview_window(content: &str, span: Span) -> PreviewWindow {
    let bytes = content.as_bytes();

    let mut start = span.start;
    let mut ellipsis_before = true;
    for _ in 0..BACKWARD_STEPS {
        let from = start as isize - 2;
        let space = last_index_of(bytes, b" ", from);
        let dot = last_index_of(bytes, b". ", from);
        if let Some(dot) = dot
            && space.is_none_or(|space| dot > space)
        {
            start = dot + 1;
            ellipsis_before = false;
            break;
        }
        let Some(space) = space else {
            start = 0;
            ellipsis_before = false;
            break;
        };
        start = space + 1;
    }

    let mut end = span.end();
    let mut ellipsis_after = true;
    for _ in 0..FORWARD_STEPS {
        let space = index_of(bytes, b" ", end + 1);
        let dot = index_of(bytes, b". ", end + 1);
        if let (Some(dot), Some(space)) = (dot, space)
            && dot < space
        {
            end = dot;
            ellipsis_after = false;
            break;
        }
        let Some(space) = space else {
            end = content.len();
            ellipsis_after = false;
            break;
        };
        end = space;
    }

    PreviewWindow {
        start,
        end,
        ellipsis_before,
        ellipsis_after,
    }
}

/// Builds merged previews for a record's content matches, keeping at most `max`.
///
/// Spans are processed in start order. A window that starts at or before the end of the
/// previous preview joins it; the merged preview extends to the further of the two ends.
pub fn build_previews(content: &str, spans: &[Span], max: usize) -> Vec<Preview> {
    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|span| span.start);

    let mut previews: Vec<Preview> = Vec::new();
    for span in sorted {
        let window = preview_window(content, span);
        match previews.last_mut() {
            Some(last) if window.start <= last.window.end => {
                last.highlights.push(span);
                if window.end > last.window.end {
                    last.window.end = window.end;
                    last.window.ellipsis_after = window.ellipsis_after;
                }
            }
            _ => previews.push(Preview {
                window,
                highlights: vec![span],
            }),
        }
    }

    previews.truncate(max);
    previews
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_of(content: &str, word: &str) -> Span {
        Span::new(content.find(word).unwrap(), word.len())
    }

    fn shown<'a>(content: &'a str, window: &PreviewWindow) -> &'a str {
        &content[window.start..window.end]
    }

    #[test]
    fn short_content_is_shown_whole() {
        let content = "Connect the motor to the board";
        let window = preview_window(content, span_of(content, "motor"));
        assert_eq!(shown(content, &window), content);
        assert!(!window.ellipsis_before);
        assert!(!window.ellipsis_after);
    }

    #[test]
    fn long_content_gets_ellipses() {
        let content = "a1 a2 a3 a4 a5 a6 a7 a8 target b1 b2 b3 b4 b5 b6 b7 b8 b9 b10 b11 b12";
        let window = preview_window(content, span_of(content, "target"));
        assert_eq!(
            shown(content, &window),
            "a4 a5 a6 a7 a8 target b1 b2 b3 b4 b5 b6 b7 b8 b9 b10"
        );
        assert!(window.ellipsis_before);
        assert!(window.ellipsis_after);
    }

    #[test]
    fn sentence_boundaries_stop_the_walk() {
        let content = "First sentence ends. Then the motor spins. Another one follows here.";
        let window = preview_window(content, span_of(content, "motor"));
        assert_eq!(shown(content, &window), " Then the motor spins");
        assert!(!window.ellipsis_before);
        assert!(!window.ellipsis_after);
    }

    #[test]
    fn match_at_start_has_no_leading_ellipsis() {
        let content = "Motor control with field oriented control";
        let window = preview_window(content, Span::new(0, 5));
        assert_eq!(window.start, 0);
        assert!(!window.ellipsis_before);
    }

    #[test]
    fn close_matches_merge_into_one_preview() {
        let content = "the motor and the other motor run";
        let spans = [span_of(content, "other"), span_of(content, "motor")];
        let previews = build_previews(content, &spans, 3);

        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].highlights, vec![Span::new(4, 5), Span::new(18, 5)]);
        assert_eq!(shown(content, &previews[0].window), content);
    }

    #[test]
    fn distant_matches_get_separate_previews_capped_at_max() {
        let words: Vec<String> = (0..80).map(|i| format!("w{i}")).collect();
        let content = words.join(" ");
        let spans: Vec<Span> = ["w5", "w30", "w55", "w78"]
            .iter()
            .map(|w| span_of(&content, &format!(" {w} ")))
            .map(|s| Span::new(s.start + 1, s.len - 2))
            .collect();

        let previews = build_previews(&content, &spans, 3);
        assert_eq!(previews.len(), 3);
        assert_eq!(previews[0].highlights.len(), 1);
        assert!(previews[0].window.end < previews[1].window.start);

        let segments = previews[1].segments(&content);
        assert!(segments.iter().any(|s| s.highlighted && s.text == "w30"));
    }

    #[test]
    fn merged_preview_keeps_the_further_end() {
        let content = "alpha beta gamma delta";
        let spans = [Span::new(0, 5), Span::new(6, 4)];
        let previews = build_previews(content, &spans, 3);
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].window.end, content.len());
    }

    #[test]
    fn search_helpers_mirror_string_search() {
        let bytes = b"a. b c";
        assert_eq!(last_index_of(bytes, b" ", 3), Some(2));
        assert_eq!(last_index_of(bytes, b". ", 1), Some(1));
        assert_eq!(last_index_of(bytes, b" ", -1), None);
        assert_eq!(index_of(bytes, b" ", 3), Some(4));
        assert_eq!(index_of(bytes, b" ", 10), None);
    }
}
