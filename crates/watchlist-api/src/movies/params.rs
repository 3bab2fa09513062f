//! Movie list filter and request parameter types.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Default number of movies per page.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(9);

/// Star rating filter value, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

/// Error returned when a rating is outside `1..=5`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between {} and {}, got {value}", Rating::MIN, Rating::MAX)]
pub struct InvalidRating {
    /// The rejected input.
    pub value: String,
}

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a rating, returning `None` outside `1..=5`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the numeric rating.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterates over every valid rating in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl TryFrom<u8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| InvalidRating {
            value: value.to_string(),
        })
    }
}

impl FromStr for Rating {
    type Err = InvalidRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidRating {
                value: String::from(s),
            })
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tri-state watched filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WatchedFilter {
    /// No watched filter.
    #[default]
    Any,
    /// Only watched movies.
    Watched,
    /// Only unwatched movies.
    Unwatched,
}

impl WatchedFilter {
    /// All variants in selector order.
    pub const ALL: [Self; 3] = [Self::Any, Self::Watched, Self::Unwatched];

    /// Returns the boolean sent as the `watched` query parameter.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Any => None,
            Self::Watched => Some(true),
            Self::Unwatched => Some(false),
        }
    }
}

impl From<Option<bool>> for WatchedFilter {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Any,
            Some(true) => Self::Watched,
            Some(false) => Self::Unwatched,
        }
    }
}

/// The filter record sent with every movie list request.
///
/// Updates never mutate a record in place: [`MovieFilter::apply`]
/// returns a new record with exactly one field replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieFilter {
    /// Genre name (`None` = all genres).
    pub genre: Option<String>,
    /// Watched status filter.
    pub watched: WatchedFilter,
    /// Rating filter (`None` = all ratings).
    pub rating: Option<Rating>,
    /// 1-based page number.
    pub page: NonZeroU32,
    /// Movies per page (`limit` on the wire).
    pub page_size: NonZeroU32,
}

impl Default for MovieFilter {
    fn default() -> Self {
        Self {
            genre: None,
            watched: WatchedFilter::Any,
            rating: None,
            page: NonZeroU32::MIN,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A single-field update to a [`MovieFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// Replace the genre.
    Genre(Option<String>),
    /// Replace the watched filter.
    Watched(WatchedFilter),
    /// Replace the rating filter.
    Rating(Option<Rating>),
    /// Replace the page number.
    Page(NonZeroU32),
    /// Replace the page size.
    PageSize(NonZeroU32),
}

impl FilterChange {
    /// Builds a genre change, treating a blank name as "all genres".
    #[must_use]
    pub fn genre(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::Genre(None)
        } else {
            Self::Genre(Some(String::from(trimmed)))
        }
    }

    /// Returns `true` for changes to the search criteria (genre, watched,
    /// rating) as opposed to the pagination cursor.
    #[must_use]
    pub const fn is_criterion(&self) -> bool {
        matches!(self, Self::Genre(_) | Self::Watched(_) | Self::Rating(_))
    }
}

impl MovieFilter {
    /// Creates the default filter with a custom page size.
    #[must_use]
    pub fn with_page_size(page_size: NonZeroU32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Returns a new filter with `change` applied and all other fields kept.
    #[must_use]
    pub fn apply(&self, change: FilterChange) -> Self {
        let mut next = self.clone();
        match change {
            FilterChange::Genre(genre) => next.genre = genre,
            FilterChange::Watched(watched) => next.watched = watched,
            FilterChange::Rating(rating) => next.rating = rating,
            FilterChange::Page(page) => next.page = page,
            FilterChange::PageSize(page_size) => next.page_size = page_size,
        }
        next
    }

    /// Builds the query string pairs for the `movies` endpoint.
    ///
    /// Unset filters are omitted; `page` and `limit` are always present.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(5);
        if let Some(ref genre) = self.genre {
            query.push(("genre", genre.clone()));
        }
        if let Some(watched) = self.watched.as_bool() {
            query.push(("watched", watched.to_string()));
        }
        if let Some(rating) = self.rating {
            query.push(("rating", rating.to_string()));
        }
        query.push(("page", self.page.to_string()));
        query.push(("limit", self.page_size.to_string()));
        query
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_default_filter() {
        // Arrange & Act
        let filter = MovieFilter::default();

        // Assert
        assert_eq!(filter.genre, None);
        assert_eq!(filter.watched, WatchedFilter::Any);
        assert_eq!(filter.rating, None);
        assert_eq!(filter.page.get(), 1);
        assert_eq!(filter.page_size.get(), 10);
    }

    #[test]
    fn test_rating_bounds() {
        // Arrange & Act & Assert
        assert!(Rating::new(0).is_none());
        assert_eq!(Rating::new(1).unwrap().get(), 1);
        assert_eq!(Rating::new(5).unwrap().get(), 5);
        assert!(Rating::new(6).is_none());
        assert_eq!(Rating::all().count(), 5);
    }

    #[test]
    fn test_rating_from_str() {
        // Arrange & Act & Assert
        assert_eq!("3".parse::<Rating>().unwrap().get(), 3);
        assert_eq!(" 4 ".parse::<Rating>().unwrap().get(), 4);
        let err = "9".parse::<Rating>().unwrap_err();
        assert_eq!(err.to_string(), "rating must be between 1 and 5, got 9");
        assert!("abc".parse::<Rating>().is_err());
    }

    #[test]
    fn test_apply_replaces_single_field() {
        // Arrange
        let filter = MovieFilter {
            genre: Some(String::from("Action")),
            watched: WatchedFilter::Watched,
            rating: Rating::new(4),
            page: nz(3),
            page_size: nz(10),
        };

        // Act
        let next = filter.apply(FilterChange::Page(nz(2)));

        // Assert
        assert_eq!(next.page.get(), 2);
        assert_eq!(next.genre.as_deref(), Some("Action"));
        assert_eq!(next.watched, WatchedFilter::Watched);
        assert_eq!(next.rating, Rating::new(4));
        // original record is untouched
        assert_eq!(filter.page.get(), 3);
    }

    #[test]
    fn test_genre_change_blank_means_all() {
        // Arrange & Act & Assert
        assert_eq!(FilterChange::genre(""), FilterChange::Genre(None));
        assert_eq!(FilterChange::genre("   "), FilterChange::Genre(None));
        assert_eq!(
            FilterChange::genre(" Comedy "),
            FilterChange::Genre(Some(String::from("Comedy")))
        );
    }

    #[test]
    fn test_is_criterion() {
        // Arrange & Act & Assert
        assert!(FilterChange::Genre(None).is_criterion());
        assert!(FilterChange::Watched(WatchedFilter::Unwatched).is_criterion());
        assert!(FilterChange::Rating(None).is_criterion());
        assert!(!FilterChange::Page(nz(2)).is_criterion());
        assert!(!FilterChange::PageSize(nz(20)).is_criterion());
    }

    #[test]
    fn test_to_query_default_only_pagination() {
        // Arrange
        let filter = MovieFilter::default();

        // Act
        let query = filter.to_query();

        // Assert
        assert_eq!(
            query,
            vec![("page", String::from("1")), ("limit", String::from("10"))]
        );
    }

    #[test]
    fn test_to_query_all_fields() {
        // Arrange
        let filter = MovieFilter {
            genre: Some(String::from("Comedy")),
            watched: WatchedFilter::Unwatched,
            rating: Rating::new(5),
            page: nz(2),
            page_size: nz(20),
        };

        // Act
        let query = filter.to_query();

        // Assert
        assert_eq!(
            query,
            vec![
                ("genre", String::from("Comedy")),
                ("watched", String::from("false")),
                ("rating", String::from("5")),
                ("page", String::from("2")),
                ("limit", String::from("20")),
            ]
        );
    }

    #[test]
    fn test_watched_from_option_bool() {
        // Arrange & Act & Assert
        assert_eq!(WatchedFilter::from(None), WatchedFilter::Any);
        assert_eq!(WatchedFilter::from(Some(true)), WatchedFilter::Watched);
        assert_eq!(WatchedFilter::from(Some(false)), WatchedFilter::Unwatched);
        assert_eq!(WatchedFilter::Watched.as_bool(), Some(true));
    }
}
