//! `MovieClient` - watchlist backend HTTP client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::MovieApi;
use super::error::FetchError;
use super::params::MovieFilter;
use super::types::{ApiErrorBody, MoviePage};

/// Default base URL of the watchlist backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Watchlist backend client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
}

/// Builder for `MovieClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl MovieClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (config value, or wiremock in tests).
    ///
    /// A trailing slash is appended when missing so that relative endpoint
    /// paths resolve beneath it.
    #[must_use]
    pub fn base_url(mut self, mut url: Url) -> Self {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<MovieClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(MovieClient {
            http_client,
            base_url,
        })
    }
}

impl MovieClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> MovieClientBuilder {
        MovieClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with query params and decodes the JSON body.
    ///
    /// Failures are classified into [`FetchError`] variants; there is no
    /// retry.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::Unknown(Some(format!("invalid request URL {path}: {e}"))))?;

        let request = self
            .http_client
            .get(url)
            .query(query)
            .build()
            .map_err(|e| FetchError::Unknown(Some(format!("failed to build request: {e}"))))?;

        tracing::debug!(url = %request.url(), "movie API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        tracing::debug!(%status, body_len = body.len(), "movie API response");

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .unwrap_or_default()
                .into_message();
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("failed to decode movie list: {e}")))
    }
}

impl MovieApi for MovieClient {
    #[instrument(skip_all, fields(page = filter.page.get(), limit = filter.page_size.get()))]
    async fn fetch_movies(&self, filter: &MovieFilter) -> Result<MoviePage, FetchError> {
        self.get_json("movies", &filter.to_query()).await
    }
}
