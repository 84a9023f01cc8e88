//! The query/render loop behind a search box.
//!
//! A [`SearchSession`] owns everything one search box needs: the input text, the shared
//! generation counter, the scheduler of pending render batches, and the view that a page
//! would display. Input and key events drive it; [`SearchSession::tick`] runs the batches
//! whose time has come.
//!
//! The session is **Idle** while the trimmed input is empty (search UI hidden) and
//! **Active** otherwise. Input whose trimmed text equals the current query changes nothing.
//! A changed query advances the generation, clears the results, runs the staged search, and
//! appends the first batch immediately. Later batches follow one tick apart. Batches left
//! over from an older query stay queued and find their token cancelled when they run.

use std::time::Instant;

use docsearch_corpus::Corpus;
use docsearch_index::{SearchIndex, SearchStage};
use log::{debug, warn};

use crate::{
    RenderError,
    batch::{BatchStep, GenerationCounter, RenderBatch},
    options::RenderOptions,
    result::{RenderedResult, no_results_html, render_result, results_list_html},
    scheduler::Scheduler,
};

/// Keys handled by the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Select the next result.
    Down,
    /// Select the previous result.
    Up,
    /// Follow the selected result, or the first one.
    Enter,
    /// Clear the input.
    Escape,
}

/// Contents of the results container.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsPane {
    /// Nothing shown.
    #[default]
    Empty,
    /// The query matched nothing.
    NoResults,
    /// Results rendered so far, in rank order.
    List(Vec<RenderedResult>),
}

impl ResultsPane {
    /// Rendered results, empty unless this is a list.
    pub fn results(&self) -> &[RenderedResult] {
        match self {
            Self::List(results) => results,
            Self::Empty | Self::NoResults => &[],
        }
    }

    /// Renders the container's contents, marking `active` as selected.
    pub fn to_html(&self, active: Option<usize>) -> String {
        match self {
            Self::Empty => String::new(),
            Self::NoResults => no_results_html(),
            Self::List(results) => results_list_html(results, active),
        }
    }
}

/// What the page shows.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    /// Text in the search input.
    pub input: String,
    /// True while the search UI is visible.
    pub search_active: bool,
    /// Results container.
    pub results: ResultsPane,
    /// Keyboard-selected result.
    pub active: Option<usize>,
    /// Stage that produced the current results.
    pub stage: Option<SearchStage>,
}

/// One search box over an indexed corpus.
pub struct SearchSession<'a> {
    /// Records shown in results.
    corpus: &'a Corpus,
    /// Index queried on input.
    index: &'a SearchIndex,
    /// Batching and preview options.
    options: RenderOptions,
    /// Live query generation.
    generation: GenerationCounter,
    /// Trimmed text of the last query, `None` before the first input.
    current_input: Option<String>,
    /// Displayed state.
    view: SessionView,
    /// Pending render batches.
    scheduler: Scheduler,
}

impl<'a> SearchSession<'a> {
    /// Creates an idle session.
    pub fn new(corpus: &'a Corpus, index: &'a SearchIndex, options: RenderOptions) -> Self {
        Self {
            corpus,
            index,
            options,
            generation: GenerationCounter::new(),
            current_input: None,
            view: SessionView::default(),
            scheduler: Scheduler::new(),
        }
    }

    /// Current view.
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Live query generation.
    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    /// True while the search UI is hidden.
    pub fn is_idle(&self) -> bool {
        !self.view.search_active
    }

    /// Number of scheduled batches, stale ones included.
    pub fn pending_batches(&self) -> usize {
        self.scheduler.len()
    }

    /// Handles the input text changing to `text`.
    pub fn on_input(&mut self, text: &str, now: Instant) -> Result<(), RenderError> {
        self.view.input = text.to_string();
        let trimmed = text.trim();
        self.view.search_active = !trimmed.is_empty();

        if self.current_input.as_deref() == Some(trimmed) {
            return Ok(());
        }
        self.current_input = Some(trimmed.to_string());

        let token = self.generation.advance();
        debug!("query {trimmed:?} is generation {}", token.generation());
        self.view.results = ResultsPane::Empty;
        self.view.active = None;
        self.view.stage = None;

        let Some(outcome) = self.index.search(trimmed)? else {
            return Ok(());
        };
        self.view.stage = Some(outcome.stage);

        if outcome.is_empty() {
            self.view.results = ResultsPane::NoResults;
            return Ok(());
        }

        self.view.results = ResultsPane::List(Vec::new());
        self.run_batch(RenderBatch::new(outcome.hits, token), now);
        Ok(())
    }

    /// Handles a key press, returning the href to follow for [`Key::Enter`].
    pub fn on_key(&mut self, key: Key, now: Instant) -> Result<Option<String>, RenderError> {
        let len = self.view.results.results().len();
        match key {
            Key::Down => {
                self.view.active = match self.view.active {
                    None if len > 0 => Some(0),
                    Some(i) if i + 1 < len => Some(i + 1),
                    other => other,
                };
            }
            Key::Up => {
                self.view.active = self.view.active.and_then(|i| i.checked_sub(1));
            }
            Key::Enter => {
                let target = self.view.active.unwrap_or(0);
                return Ok(self
                    .view
                    .results
                    .results()
                    .get(target)
                    .map(|result| result.href.clone()));
            }
            Key::Escape => self.on_input("", now)?,
        }
        Ok(None)
    }

    /// Handles the input gaining focus by re-running the update for the current text.
    pub fn on_focus(&mut self, now: Instant) -> Result<(), RenderError> {
        let input = self.view.input.clone();
        self.on_input(&input, now)
    }

    /// Hides the search UI, leaving the input and results untouched.
    pub fn dismiss(&mut self) {
        self.view.search_active = false;
    }

    /// Runs every batch due at or before `now`, returning the number of results appended.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut appended = 0;
        while let Some(batch) = self.scheduler.pop_due(now) {
            appended += self.run_batch(batch, now);
        }
        appended
    }

    /// Runs scheduled batches in due order until none remain.
    pub fn run_until_idle(&mut self) -> usize {
        let mut appended = 0;
        while let Some(due) = self.scheduler.next_due() {
            appended += self.tick(due);
        }
        appended
    }

    /// Runs one batch and schedules its continuation.
    fn run_batch(&mut self, batch: RenderBatch, now: Instant) -> usize {
        let generation = batch.token().generation();
        let corpus = self.corpus;
        let max_previews = self.options.max_previews;

        let mut rendered = Vec::new();
        let step = batch.run(self.options.batch_size, |hit| match corpus.get(&hit.id) {
            Some(record) => rendered.push(render_result(record, hit, max_previews)),
            None => warn!("hit {} has no corpus record", hit.id),
        });

        if let ResultsPane::List(results) = &mut self.view.results {
            results.extend(rendered);
        }

        match step {
            BatchStep::Cancelled => {
                debug!("skipped stale render batch of generation {generation}");
                0
            }
            BatchStep::Finished { appended } => appended,
            BatchStep::Pending { appended, next } => {
                self.scheduler
                    .schedule(now + self.options.batch_interval, next);
                appended
            }
        }
    }
}
