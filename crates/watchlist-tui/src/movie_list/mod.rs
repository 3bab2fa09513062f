//! Movie list TUI main loop.

/// Fetch dispatch.
pub mod fetch;
/// Key handling.
pub mod input;
/// Pagination control.
pub mod pagination;
/// Render projection.
pub mod projection;
/// Movie list state and coordinator.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedSender};
use watchlist_api::movies::MovieApi;

use self::fetch::spawn_fetch;
use self::input::{Action, ViewOptions, handle_key};
use self::state::{FetchOutcome, FetchTicket, MovieListView};

/// Runs the movie list TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails. Fetch
/// failures are shown in the view and do not end the loop.
#[allow(clippy::module_name_repetitions)]
pub async fn run_movie_list<A>(
    api: Arc<A>,
    mut view: MovieListView,
    options: ViewOptions,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &api, &mut view, &options).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop: redraws, then waits for a key press or a fetch outcome.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: &Arc<A>,
    view: &mut MovieListView,
    options: &ViewOptions,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    let mut scroll: usize = 0;
    let mut max_scroll: usize = 0;

    dispatch(api, Some(view.mount()), &tx);

    loop {
        {
            let model = projection::project(view);
            terminal
                .draw(|frame| {
                    max_scroll = ui::draw(frame, &model, scroll);
                })
                .context("failed to draw TUI")?;
        }
        scroll = scroll.min(max_scroll);

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    return Ok(());
                };
                if let Event::Key(key) = event.context("failed to read event")?
                    && key.kind == KeyEventKind::Press
                {
                    let action = handle_key(view, options, key.code, key.modifiers);
                    match action {
                        Action::Quit => return Ok(()),
                        Action::Change(_) | Action::SetPage(_) => scroll = 0,
                        Action::ScrollUp => scroll = scroll.saturating_sub(1),
                        Action::ScrollDown => scroll = scroll.saturating_add(1).min(max_scroll),
                        Action::Refresh | Action::Ignore => {}
                    }
                    dispatch(api, handle_action(view, action), &tx);
                }
            }
            Some(outcome) = rx.recv() => {
                view.apply_outcome(outcome);
            }
        }
    }
}

/// Applies `action` to the view. Returns the fetch to start, if any.
///
/// Only filter, page and refresh actions touch the view; scrolling and
/// quitting are handled by the event loop.
fn handle_action(view: &mut MovieListView, action: Action) -> Option<FetchTicket> {
    match action {
        Action::Change(change) => view.set_filter(change),
        Action::SetPage(page) => view.set_page(page),
        Action::Refresh => Some(view.refresh()),
        Action::Quit | Action::ScrollUp | Action::ScrollDown | Action::Ignore => None,
    }
}

/// Spawns the fetch for `ticket`, if any.
fn dispatch<A>(api: &Arc<A>, ticket: Option<FetchTicket>, tx: &UnboundedSender<FetchOutcome>)
where
    A: MovieApi + Send + Sync + 'static,
{
    if let Some(ticket) = ticket {
        drop(spawn_fetch(Arc::clone(api), ticket, tx.clone()));
    }
}
