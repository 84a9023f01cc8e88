//! Implementation of `docsearch session`.
//!
//! Each stdin line is one event for the search box: the full input text, or one of
//! `<down>`, `<up>`, `<enter>`, `<esc>`, `<focus>`, `<blur>`. Pending render batches run to
//! completion after every event, then the view is printed.

use std::{
    io::{self, BufRead},
    process::ExitCode,
    time::Instant,
};

use docsearch_render::{Key, RenderError, SearchSession};

use crate::cli::{
    args::SessionCommand,
    context::CommandContext,
    output::{format_view, subheader},
};

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionEvent {
    /// The input text changed.
    Input(String),
    /// A navigation key was pressed.
    Key(Key),
    /// The input gained focus.
    Focus,
    /// The user clicked outside the search box.
    Blur,
}

impl SessionEvent {
    /// Parses one stdin line.
    fn parse(line: &str) -> Self {
        match line {
            "<down>" => Self::Key(Key::Down),
            "<up>" => Self::Key(Key::Up),
            "<enter>" => Self::Key(Key::Enter),
            "<esc>" => Self::Key(Key::Escape),
            "<focus>" => Self::Focus,
            "<blur>" => Self::Blur,
            text => Self::Input(text.to_string()),
        }
    }
}

/// Applies one event, returning the href to follow if one was chosen.
fn apply(
    session: &mut SearchSession<'_>,
    event: SessionEvent,
) -> Result<Option<String>, RenderError> {
    let now = Instant::now();
    match event {
        SessionEvent::Input(text) => session.on_input(&text, now).map(|()| None),
        SessionEvent::Key(key) => session.on_key(key, now),
        SessionEvent::Focus => session.on_focus(now).map(|()| None),
        SessionEvent::Blur => {
            session.dismiss();
            Ok(None)
        }
    }
}

/// Drives a search session from stdin.
pub fn run(ctx: &CommandContext, cmd: &SessionCommand) -> ExitCode {
    let site = match ctx.load_site(&cmd.site) {
        Ok(site) => site,
        Err(code) => return code,
    };
    let mut session = SearchSession::new(&site.corpus, &site.index, ctx.render_options());

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: failed to read input: {e}");
                return ExitCode::FAILURE;
            }
        };

        let follow = match apply(&mut session, SessionEvent::parse(&line)) {
            Ok(follow) => follow,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        };
        session.run_until_idle();

        if let Some(href) = follow {
            println!("{} {href}", subheader("open:"));
            continue;
        }

        let view = session.view();
        if cmd.html {
            println!("{}", view.results.to_html(view.active));
        } else {
            println!("{}", format_view(view));
        }
    }

    ExitCode::SUCCESS
}
