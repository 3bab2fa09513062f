//! Fetch failure type for the movie listing API.

/// Message shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Error fetching movies";

/// Returns the message, or [`FALLBACK_MESSAGE`] when absent or blank.
#[allow(clippy::ref_option)]
fn or_fallback(message: &Option<String>) -> &str {
    message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(FALLBACK_MESSAGE)
}

/// A failed movie list fetch.
///
/// The `Display` output is the text shown to the user in place of the
/// movie grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("{}", or_fallback(.message))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, if any.
        message: Option<String>,
    },
    /// The response body was not a valid movie page.
    #[error("{0}")]
    Malformed(String),
    /// Any other failure, optionally with a message.
    #[error("{}", or_fallback(.0))]
    Unknown(Option<String>),
}

impl FetchError {
    /// Short label for the failure class, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Server { .. } => "server",
            Self::Malformed(_) => "malformed",
            Self::Unknown(_) => "unknown",
        }
    }
}
