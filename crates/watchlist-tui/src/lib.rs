//! Terminal UI components for the movie watchlist.
//!
//! Uses `ratatui` + `crossterm` for rendering and a current-thread
//! `tokio` event loop for fetch dispatch.

/// Paginated, filterable movie list view.
pub mod movie_list;

pub use movie_list::run_movie_list;
