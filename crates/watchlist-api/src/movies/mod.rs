//! Movie listing API client module.
//!
//! Handles HTTP requests to the backend `movies` endpoint and
//! defines the filter record sent with every request.

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, MovieClient, MovieClientBuilder};
pub use error::{FALLBACK_MESSAGE, FetchError};
pub use params::{
    DEFAULT_PAGE_SIZE, FilterChange, InvalidRating, MovieFilter, Rating, WatchedFilter,
};
pub use types::{Movie, MoviePage};
