//! Movie list view state and the filter/fetch coordinator.

use std::num::NonZeroU32;

use watchlist_api::movies::{FetchError, FilterChange, Movie, MovieFilter, MoviePage};

/// The most recently fetched page of movies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultState {
    /// Movies on the current page.
    pub movies: Vec<Movie>,
    /// Total number of pages (at least 1).
    pub total_pages: NonZeroU32,
}

impl Default for ResultState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            total_pages: NonZeroU32::MIN,
        }
    }
}

impl From<MoviePage> for ResultState {
    fn from(page: MoviePage) -> Self {
        Self {
            movies: page.movies,
            total_pages: NonZeroU32::new(page.pages).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Lifecycle of the current fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch succeeded.
    Succeeded,
    /// The latest fetch failed with the given display message.
    Failed(String),
}

/// A scheduled fetch: the filter snapshot plus its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    filter: MovieFilter,
}

impl FetchTicket {
    /// Sequence number assigned when the fetch was scheduled.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Filter to request.
    #[must_use]
    pub const fn filter(&self) -> &MovieFilter {
        &self.filter
    }
}

/// Completion of a [`FetchTicket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    seq: u64,
    result: Result<MoviePage, FetchError>,
}

impl FetchOutcome {
    /// Pairs a fetch result with the ticket's sequence number.
    #[must_use]
    pub const fn new(seq: u64, result: Result<MoviePage, FetchError>) -> Self {
        Self { seq, result }
    }

    /// Sequence number of the originating ticket.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

/// What [`MovieListView::apply_outcome`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeDisposition {
    /// The outcome belonged to the latest fetch and updated the view.
    Applied,
    /// A newer fetch was scheduled since; the outcome was dropped.
    Stale,
}

/// State of the movie list view.
///
/// Every operation that changes the filter returns the [`FetchTicket`]
/// the caller must dispatch; nothing is fetched implicitly.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieListView {
    filter: MovieFilter,
    result: ResultState,
    status: RequestStatus,
    /// Sequence number of the most recently scheduled fetch (0 = none).
    latest_seq: u64,
    reset_page_on_filter_change: bool,
}

impl MovieListView {
    /// Creates an idle view with the given initial filter.
    #[must_use]
    pub fn new(filter: MovieFilter) -> Self {
        Self {
            filter,
            result: ResultState::default(),
            status: RequestStatus::Idle,
            latest_seq: 0,
            reset_page_on_filter_change: false,
        }
    }

    /// Makes genre/watched/rating changes jump back to page 1.
    #[must_use]
    pub const fn with_page_reset(mut self, enabled: bool) -> Self {
        self.reset_page_on_filter_change = enabled;
        self
    }

    /// Current filter.
    #[must_use]
    pub const fn filter(&self) -> &MovieFilter {
        &self.filter
    }

    /// Current result.
    #[must_use]
    pub const fn result(&self) -> &ResultState {
        &self.result
    }

    /// Current request status.
    #[must_use]
    pub const fn status(&self) -> &RequestStatus {
        &self.status
    }

    /// Returns `true` while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, RequestStatus::Loading)
    }

    /// Schedules the initial fetch when the view is shown.
    pub fn mount(&mut self) -> FetchTicket {
        self.schedule()
    }

    /// Replaces one filter field.
    ///
    /// Returns a ticket only if the filter actually changed.
    pub fn set_filter(&mut self, change: FilterChange) -> Option<FetchTicket> {
        let reset_page = self.reset_page_on_filter_change && change.is_criterion();
        let mut next = self.filter.apply(change);
        if reset_page {
            next.page = NonZeroU32::MIN;
        }
        if next == self.filter {
            tracing::debug!("filter unchanged, no fetch scheduled");
            return None;
        }
        self.filter = next;
        Some(self.schedule())
    }

    /// Moves to page `page`. Not validated against the total page count.
    pub fn set_page(&mut self, page: NonZeroU32) -> Option<FetchTicket> {
        self.set_filter(FilterChange::Page(page))
    }

    /// Re-fetches the current filter.
    pub fn refresh(&mut self) -> FetchTicket {
        self.schedule()
    }

    /// Applies a completed fetch.
    ///
    /// Outcomes from superseded tickets are discarded so an older response
    /// can never overwrite a newer one. On failure the previous result is
    /// kept and only the status changes.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> OutcomeDisposition {
        if outcome.seq != self.latest_seq {
            tracing::debug!(
                seq = outcome.seq,
                latest = self.latest_seq,
                "discarding stale fetch outcome"
            );
            return OutcomeDisposition::Stale;
        }

        match outcome.result {
            Ok(page) => {
                self.result = ResultState::from(page);
                tracing::debug!(
                    seq = outcome.seq,
                    movies = self.result.movies.len(),
                    total_pages = self.result.total_pages.get(),
                    "fetch succeeded"
                );
                self.status = RequestStatus::Succeeded;
            }
            Err(err) => {
                tracing::debug!(seq = outcome.seq, kind = err.kind(), %err, "fetch failed");
                self.status = RequestStatus::Failed(err.to_string());
            }
        }
        OutcomeDisposition::Applied
    }

    /// Marks the view as loading and issues a ticket for the current filter.
    fn schedule(&mut self) -> FetchTicket {
        self.latest_seq = self.latest_seq.saturating_add(1);
        self.status = RequestStatus::Loading;
        tracing::debug!(seq = self.latest_seq, filter = ?self.filter, "fetch scheduled");
        FetchTicket {
            seq: self.latest_seq,
            filter: self.filter.clone(),
        }
    }
}
