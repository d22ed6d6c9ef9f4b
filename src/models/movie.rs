//! Movie types and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier for a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    /// Creates a new movie ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row ID.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A movie row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique identifier.
    pub id: MovieId,
    /// The movie title.
    pub title: String,
    /// The release year.
    pub release_year: i32,
}

impl Movie {
    /// Formats the movie as `Title (Year)`, the display form used across
    /// cast lists, charts, and the treemap.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.release_year)
    }
}

/// A movie together with its appearance count.
///
/// Produced by the LEFT JOIN summary query; movies with no recorded
/// actors report a count of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// The movie title.
    pub title: String,
    /// The release year.
    pub release_year: i32,
    /// Number of actors recorded for the movie.
    pub actor_count: u32,
}

impl MovieSummary {
    /// Formats the summary as `Title (Year)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.release_year)
    }
}

/// Sort order for the full movie listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieSort {
    /// Alphabetical by title.
    Name,
    /// Ascending by release year.
    Year,
    /// Insertion order (no ORDER BY clause).
    #[default]
    None,
}

impl MovieSort {
    /// Parses a sort string; unknown values fall back to insertion order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "name" | "title" => Self::Name,
            "year" => Self::Year,
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_movie_label() {
        let movie = Movie {
            id: MovieId::new(1),
            title: "Titanic".to_string(),
            release_year: 1997,
        };
        assert_eq!(movie.label(), "Titanic (1997)");
    }

    #[test_case("name", MovieSort::Name; "name keyword")]
    #[test_case("Title", MovieSort::Name; "title alias case insensitive")]
    #[test_case("year", MovieSort::Year; "year keyword")]
    #[test_case("none", MovieSort::None; "none keyword")]
    #[test_case("banana", MovieSort::None; "unknown falls back")]
    fn test_movie_sort_parse(input: &str, expected: MovieSort) {
        assert_eq!(MovieSort::parse(input), expected);
    }

    #[test]
    fn test_movie_id_display() {
        assert_eq!(MovieId::new(42).to_string(), "42");
    }
}
