//! Appearance (movie-star link) types.

use super::{MovieId, StarId};
use serde::{Deserialize, Serialize};

/// A row in the `appearances` join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// Row identifier.
    pub id: i64,
    /// The movie the star appeared in.
    pub movie_id: MovieId,
    /// The star appearing in the movie.
    pub star_id: StarId,
}

/// Outcome of a find-or-insert link operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new appearance row was inserted.
    Linked {
        /// The new appearance row ID.
        appearance_id: i64,
    },
    /// The appearance was already recorded.
    AlreadyLinked,
}

/// A pair of actors and how many movies they share.
///
/// Produced by the self-join over `appearances` with `star_id <` to
/// deduplicate; `actor_1` always sorts before `actor_2` by row ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollabPair {
    /// First actor in the pair.
    pub actor_1: String,
    /// Second actor in the pair.
    pub actor_2: String,
    /// Number of movies both appeared in.
    pub shared_movies: u32,
}

/// One collaborator of a given actor, with shared titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// The collaborating actor's name.
    pub name: String,
    /// Comma-joined distinct titles both appeared in.
    pub movies: String,
    /// Number of distinct shared movies.
    pub shared_movies: u32,
}

/// One row of a bulk-link input file: attach `actor` to `title (year)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkLinkEntry {
    /// Movie title.
    pub title: String,
    /// Release year, disambiguating same-title movies.
    pub year: i32,
    /// Actor name to link.
    pub actor: String,
}

/// Per-entry outcome of a bulk link run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkLinkOutcome {
    /// The appearance row was inserted.
    Linked {
        /// The new appearance row ID.
        appearance_id: i64,
    },
    /// The appearance already existed.
    AlreadyLinked,
    /// No movie matched the title/year.
    MovieNotFound,
    /// No star matched the actor name.
    StarNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_outcome_variants() {
        assert_ne!(
            LinkOutcome::Linked { appearance_id: 1 },
            LinkOutcome::AlreadyLinked
        );
    }

    #[test]
    fn test_bulk_entry_json_shape() {
        let entry: BulkLinkEntry =
            serde_json::from_str(r#"{"title":"Juno","year":2007,"actor":"Michael Cera"}"#)
                .unwrap();
        assert_eq!(entry.title, "Juno");
        assert_eq!(entry.year, 2007);
        assert_eq!(entry.actor, "Michael Cera");
    }
}
