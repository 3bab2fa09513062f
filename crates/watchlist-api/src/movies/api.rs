//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchError;
use super::params::MovieFilter;
use super::types::MoviePage;

/// Movie listing API trait.
///
/// Abstracts the fetch collaborator for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches one page of movies matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the request fails, the backend answers
    /// with a non-success status, or the body cannot be decoded.
    async fn fetch_movies(&self, filter: &MovieFilter) -> Result<MoviePage, FetchError>;
}
