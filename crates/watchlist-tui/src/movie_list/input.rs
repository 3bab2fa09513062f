//! Key handling for the movie list view.

use std::num::NonZeroU32;

use crossterm::event::{KeyCode, KeyModifiers};
use watchlist_api::movies::{FilterChange, Rating, WatchedFilter};

use super::pagination::PaginationControl;
use super::state::MovieListView;

/// Selector choices offered by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Genres offered after "All Genres", in selector order.
    pub genres: Vec<String>,
    /// Page sizes offered by `+`/`-`, ascending.
    pub page_sizes: Vec<NonZeroU32>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            genres: vec![String::from("Action"), String::from("Comedy")],
            page_sizes: [5, 10, 20, 50]
                .into_iter()
                .filter_map(NonZeroU32::new)
                .collect(),
        }
    }
}

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the view.
    Quit,
    /// Replace one filter field.
    Change(FilterChange),
    /// Navigate to a page.
    SetPage(NonZeroU32),
    /// Re-fetch the current filter.
    Refresh,
    /// Scroll the card grid up one row.
    ScrollUp,
    /// Scroll the card grid down one row.
    ScrollDown,
    /// Nothing to do.
    Ignore,
}

/// Maps a key press to an [`Action`].
#[must_use]
pub fn handle_key(
    view: &MovieListView,
    options: &ViewOptions,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Action {
    let filter = view.filter();
    let pages = PaginationControl::new(filter.page, view.result().total_pages);

    let page_action = |page: Option<NonZeroU32>| page.map_or(Action::Ignore, Action::SetPage);
    let change_action =
        |change: Option<FilterChange>| change.map_or(Action::Ignore, Action::Change);

    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('g') => Action::Change(FilterChange::Genre(cycle_genre(
            &options.genres,
            filter.genre.as_deref(),
            true,
        ))),
        KeyCode::Char('G') => Action::Change(FilterChange::Genre(cycle_genre(
            &options.genres,
            filter.genre.as_deref(),
            false,
        ))),
        KeyCode::Char('w') => {
            Action::Change(FilterChange::Watched(cycle_watched(filter.watched, true)))
        }
        KeyCode::Char('W') => {
            Action::Change(FilterChange::Watched(cycle_watched(filter.watched, false)))
        }
        KeyCode::Char('s') => {
            Action::Change(FilterChange::Rating(cycle_rating(filter.rating, true)))
        }
        KeyCode::Char('S') => {
            Action::Change(FilterChange::Rating(cycle_rating(filter.rating, false)))
        }
        KeyCode::Char('+' | '=') => change_action(
            step_page_size(&options.page_sizes, filter.page_size, true).map(FilterChange::PageSize),
        ),
        KeyCode::Char('-') => change_action(
            step_page_size(&options.page_sizes, filter.page_size, false)
                .map(FilterChange::PageSize),
        ),
        KeyCode::Left | KeyCode::Char('h') => page_action(pages.previous()),
        KeyCode::Right | KeyCode::Char('l') => page_action(pages.next()),
        KeyCode::Home => page_action(pages.first()),
        KeyCode::End => page_action(pages.last()),
        KeyCode::Char(c @ '1'..='9') => page_action(c.to_digit(10).and_then(|d| pages.jump(d))),
        KeyCode::Char('r') | KeyCode::F(5) => Action::Refresh,
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
        _ => Action::Ignore,
    }
}

/// Steps `index` one position through a list of `len` choices, wrapping.
#[allow(clippy::arithmetic_side_effects)]
const fn step_index(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Next genre in `[All Genres, genres...]`.
///
/// A genre outside the list is treated as "All Genres".
fn cycle_genre(genres: &[String], current: Option<&str>, forward: bool) -> Option<String> {
    let index = current
        .and_then(|g| genres.iter().position(|x| x == g))
        .map_or(0, |i| i.saturating_add(1));
    let next = step_index(index, genres.len().saturating_add(1), forward);
    next.checked_sub(1).and_then(|i| genres.get(i)).cloned()
}

/// Next value in `All -> Watched -> Unwatched`.
fn cycle_watched(current: WatchedFilter, forward: bool) -> WatchedFilter {
    let all = WatchedFilter::ALL;
    let index = all.iter().position(|w| *w == current).unwrap_or(0);
    all.get(step_index(index, all.len(), forward))
        .copied()
        .unwrap_or_default()
}

/// Next value in `All Ratings -> 1 -> ... -> 5`.
fn cycle_rating(current: Option<Rating>, forward: bool) -> Option<Rating> {
    let choices: Vec<Option<Rating>> = std::iter::once(None)
        .chain(Rating::all().map(Some))
        .collect();
    let index = choices.iter().position(|r| *r == current).unwrap_or(0);
    choices
        .get(step_index(index, choices.len(), forward))
        .copied()
        .flatten()
}

/// Next larger (or smaller) configured page size, `None` at the ends.
fn step_page_size(sizes: &[NonZeroU32], current: NonZeroU32, larger: bool) -> Option<NonZeroU32> {
    if larger {
        sizes.iter().copied().filter(|s| *s > current).min()
    } else {
        sizes.iter().copied().filter(|s| *s < current).max()
    }
}
