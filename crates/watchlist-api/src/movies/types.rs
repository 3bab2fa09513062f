//! Movie API response types.

use serde::Deserialize;

/// Response from the `movies` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoviePage {
    /// Movies on the requested page, in backend order.
    pub movies: Vec<Movie>,
    /// Total number of pages for the current filter.
    pub pages: u32,
}

/// A single movie record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Movie {
    /// Unique movie identifier (`_id` on the wire).
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Genre name.
    #[serde(default)]
    pub genre: Option<String>,
    /// Whether the movie has been watched.
    #[serde(default)]
    pub watched: bool,
    /// Star rating (1-5), if rated.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Release year.
    #[serde(default, alias = "releaseYear")]
    pub year: Option<u16>,
    /// Free-form review or notes.
    #[serde(default)]
    pub review: Option<String>,
}

/// Error body returned by the backend on non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Alternative message field used by some handlers.
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Returns the first non-blank message field.
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .into_iter()
            .chain(self.error)
            .find(|m| !m.trim().is_empty())
    }
}
