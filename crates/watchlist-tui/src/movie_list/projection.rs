//! Render projection: view state to a drawable view model.

use watchlist_api::movies::{Movie, MovieFilter, WatchedFilter};

use super::pagination::PaginationControl;
use super::state::{MovieListView, RequestStatus};

/// Heading shown above the filters.
pub const HEADING: &str = "Movie Watchlist";

/// Placeholder shown in place of the grid while loading.
pub const LOADING_TEXT: &str = "Loading movies...";

/// Genre selector label for "no genre filter".
pub const ALL_GENRES: &str = "All Genres";

/// Rating selector label for "no rating filter".
pub const ALL_RATINGS: &str = "All Ratings";

/// Display label for a watched filter value.
#[must_use]
pub const fn watched_label(watched: WatchedFilter) -> &'static str {
    match watched {
        WatchedFilter::Any => "All",
        WatchedFilter::Watched => "Watched",
        WatchedFilter::Unwatched => "Unwatched",
    }
}

/// Five-star strip for a rating (`None` renders empty stars).
#[must_use]
pub fn rating_stars(rating: Option<u8>) -> String {
    let filled = usize::from(rating.unwrap_or(0).min(5));
    let mut stars = "\u{2605}".repeat(filled);
    stars.push_str(&"\u{2606}".repeat(5_usize.saturating_sub(filled)));
    stars
}

/// Current selector labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    /// Genre selector label.
    pub genre: String,
    /// Watched selector label.
    pub watched: &'static str,
    /// Rating selector label.
    pub rating: String,
    /// Movies per page.
    pub page_size: u32,
}

impl FilterBar {
    fn from_filter(filter: &MovieFilter) -> Self {
        Self {
            genre: filter
                .genre
                .clone()
                .unwrap_or_else(|| String::from(ALL_GENRES)),
            watched: watched_label(filter.watched),
            rating: filter
                .rating
                .map_or_else(|| String::from(ALL_RATINGS), |r| r.to_string()),
            page_size: filter.page_size.get(),
        }
    }
}

/// A movie card keyed by the movie's identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card<'a> {
    /// Stable key (the movie ID).
    pub key: &'a str,
    /// Movie shown on the card.
    pub movie: &'a Movie,
}

/// Content of the grid region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridContent<'a> {
    /// A fetch is in flight.
    Loading,
    /// The latest fetch failed with this message.
    Error(&'a str),
    /// One card per movie, in result order.
    Cards(Vec<Card<'a>>),
}

/// Everything the drawing code needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    /// Selector labels.
    pub filters: FilterBar,
    /// Grid region content.
    pub grid: GridContent<'a>,
    /// Page strip state.
    pub pagination: PaginationControl,
}

/// Projects the view state into a view model.
///
/// Loading wins over a previous error, and an error hides the (stale)
/// movies still held in the result.
#[must_use]
pub fn project(view: &MovieListView) -> Projection<'_> {
    let grid = match view.status() {
        RequestStatus::Loading => GridContent::Loading,
        RequestStatus::Failed(message) => GridContent::Error(message.as_str()),
        RequestStatus::Idle | RequestStatus::Succeeded => GridContent::Cards(
            view.result()
                .movies
                .iter()
                .map(|movie| Card {
                    key: movie.id.as_str(),
                    movie,
                })
                .collect(),
        ),
    };

    Projection {
        filters: FilterBar::from_filter(view.filter()),
        grid,
        pagination: PaginationControl::new(view.filter().page, view.result().total_pages),
    }
}
