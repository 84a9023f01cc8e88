//! Result rendering and the search session loop for docsearch.
//!
//! This crate turns search hits into what a just-the-docs page displays:
//! - Highlighted titles and content previews with sentence-aware windows
//! - Result markup mirroring the site's `search-results-list` classes
//! - Batched, cancellable appending of results driven by a generation counter
//! - The search box state machine with keyboard navigation
//! - Stylesheet theme detection and switching

#![warn(missing_docs)]

mod batch;
mod error;
mod escape;
mod excerpt;
mod highlight;
mod options;
mod result;
mod scheduler;
mod session;
mod theme;

pub use batch::{BatchStep, CancellationToken, GenerationCounter, RenderBatch};
pub use error::{RenderError, ThemeError};
pub use escape::escape_html;
pub use excerpt::{
    ELLIPSIS_AFTER, ELLIPSIS_BEFORE, Preview, PreviewWindow, build_previews, preview_window,
};
pub use highlight::{HIGHLIGHT_CLASS, Segment, segments_text, segments_to_html, splice_highlights};
pub use options::RenderOptions;
pub use result::{
    NO_RESULTS_TEXT, RenderedPreview, RenderedResult, no_results_html, render_result,
    results_list_html,
};
pub use scheduler::Scheduler;
pub use session::{Key, ResultsPane, SearchSession, SessionView};
pub use theme::Theme;
