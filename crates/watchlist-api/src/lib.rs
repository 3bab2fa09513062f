//! API client library for the movie watchlist.
//!
//! Provides the filter parameter types shared with the front-end and an
//! HTTP client for the watchlist backend's movie listing endpoint.

/// Movie listing API client.
pub mod movies;
