//! # Marquee
//!
//! Explorer CLI for a small relational dataset of movies, actors
//! ("stars"), and their co-appearances.
//!
//! Marquee wraps a `SQLite` database holding three tables (`movies`,
//! `stars`, `appearances`) and exposes the queries, charts, and
//! interactive insert flows for browsing it: cast lists, filmographies,
//! collaboration graphs, and a handful of file-rendered charts.
//!
//! ## Example
//!
//! ```rust,ignore
//! use marquee::storage::MovieStore;
//!
//! let store = MovieStore::open("movies.db")?;
//! let movie = store.insert_movie("Juno", 2007)?;
//! let star = store.insert_star("Elliot Page")?;
//! store.link_appearance(movie.record.id, star.record.id)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod charts;
pub mod commands;
pub mod config;
pub mod graph;
pub mod matching;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod storage;

// Re-exports for convenience
pub use config::MarqueeConfig;
pub use graph::{CollabGraph, EgoNetwork};
pub use matching::best_match;
pub use models::{
    Appearance, CollabPair, Collaborator, LinkOutcome, Movie, MovieId, MovieSummary, Star, StarId,
};
pub use storage::MovieStore;

/// Error type for marquee operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty titles/names, unparseable years, malformed CSV rows |
/// | `OperationFailed` | `SQLite` queries fail, chart files cannot be written, I/O errors |
/// | `NotFound` | A movie or star lookup matched no row |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A required field is empty (movie title, actor name)
    /// - A release year does not parse as an integer
    /// - A bulk-link CSV row is missing columns
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` database operations fail
    /// - Chart or export files cannot be written
    /// - stdin/stdout I/O errors occur during interactive prompts
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A movie or star was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for marquee operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds an [`Error::OperationFailed`] from an operation name and cause.
    pub fn operation(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::NotFound("movie 'Juno'".to_string());
        assert_eq!(err.to_string(), "not found: movie 'Juno'");
    }

    #[test]
    fn test_error_operation_helper() {
        let err = Error::operation("open_sqlite", "disk full");
        assert!(matches!(
            err,
            Error::OperationFailed { ref operation, ref cause }
                if operation == "open_sqlite" && cause == "disk full"
        ));
    }
}
