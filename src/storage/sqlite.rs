//! `SQLite` backend for the movie dataset.
//!
//! Provides connection management plus every fixed query the CLI runs:
//! listings, cast/filmography lookups, collaboration pair aggregation,
//! and the find-or-insert flows behind the interactive commands.

use crate::models::{
    Appearance, BulkLinkEntry, BulkLinkOutcome, CollabPair, Collaborator, LinkOutcome, Movie,
    MovieId, MovieSort, MovieSummary, Star, StarId,
};
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Helper to acquire mutex lock with poison recovery.
///
/// If the mutex is poisoned (due to a panic in a previous critical section),
/// we recover the inner value and log a warning. This prevents cascading
/// failures when one operation panics.
fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            poisoned.into_inner()
        },
    }
}

/// Escapes SQL LIKE wildcards in a string.
///
/// `SQLite` LIKE patterns treat `%` as "any characters" and `_` as "single
/// character". User-supplied titles and names must have these escaped to be
/// treated literally. Uses `\` as the escape character (requires
/// `ESCAPE '\'` in the LIKE clause).
fn escape_like_wildcards(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            },
            _ => result.push(c),
        }
    }
    result
}

/// Configures a `SQLite` connection for a CLI workload.
///
/// WAL journal mode for concurrent readers, NORMAL synchronous, and a 5s
/// busy timeout so a second marquee invocation waits instead of failing
/// with `SQLITE_BUSY`.
fn configure_connection(conn: &Connection) {
    // journal_mode returns a string result which execute_batch would trip on
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", "5000");
    let _ = conn.pragma_update(None, "foreign_keys", "ON");
}

/// Result of a find-or-insert, remembering whether the row pre-existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertResult<T> {
    /// The found or newly inserted record.
    pub record: T,
    /// `true` if the row already existed before the call.
    pub existed: bool,
}

/// `SQLite`-backed movie store.
pub struct MovieStore {
    /// Connection to the `SQLite` database.
    conn: Mutex<Connection>,
    /// Path to the database file (None for in-memory).
    db_path: Option<PathBuf>,
}

impl MovieStore {
    /// Opens (creating if necessary) a movie database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be initialized.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn =
            Connection::open(&db_path).map_err(|e| Error::operation("open_sqlite", e))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory movie store (used by tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| Error::operation("open_sqlite", e))?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path, if file-backed.
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        configure_connection(&conn);

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS movies (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                release_year INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS stars (
                id INTEGER PRIMARY KEY,
                actor_name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS appearances (
                id INTEGER PRIMARY KEY,
                movie_id INTEGER NOT NULL REFERENCES movies(id),
                star_id INTEGER NOT NULL REFERENCES stars(id),
                UNIQUE(movie_id, star_id)
            );

            CREATE INDEX IF NOT EXISTS idx_appearances_movie ON appearances(movie_id);
            CREATE INDEX IF NOT EXISTS idx_appearances_star ON appearances(star_id);
            CREATE INDEX IF NOT EXISTS idx_movies_title ON movies(title);
            CREATE INDEX IF NOT EXISTS idx_stars_name ON stars(actor_name);
            ",
        )
        .map_err(|e| Error::operation("initialize_schema", e))
    }

    /// Returns the `SQLite` library version (connection smoke test).
    #[must_use]
    pub fn sqlite_version(&self) -> String {
        rusqlite::version().to_string()
    }

    /// Lists the names of all base tables in the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .map_err(|e| Error::operation("list_tables", e))?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::operation("list_tables", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("list_tables", e))?;
        Ok(names)
    }

    /// Lists all movies in the requested order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_movies(&self, sort: MovieSort) -> Result<Vec<Movie>> {
        let sql = match sort {
            MovieSort::Name => {
                "SELECT id, title, release_year FROM movies ORDER BY title"
            },
            MovieSort::Year => {
                "SELECT id, title, release_year FROM movies ORDER BY release_year"
            },
            MovieSort::None => "SELECT id, title, release_year FROM movies",
        };

        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| Error::operation("list_movies", e))?;
        let movies = stmt
            .query_map([], movie_from_row)
            .map_err(|e| Error::operation("list_movies", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("list_movies", e))?;
        Ok(movies)
    }

    /// Movie summaries (title, year, actor count), ordered by year then title.
    ///
    /// Movies without recorded actors report a count of zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn movie_summaries(&self) -> Result<Vec<MovieSummary>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT m.title, m.release_year, COUNT(a.star_id) AS actor_count
                 FROM movies m
                 LEFT JOIN appearances a ON m.id = a.movie_id
                 GROUP BY m.id
                 ORDER BY m.release_year, m.title",
            )
            .map_err(|e| Error::operation("movie_summaries", e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(MovieSummary {
                    title: row.get(0)?,
                    release_year: row.get(1)?,
                    actor_count: row.get(2)?,
                })
            })
            .map_err(|e| Error::operation("movie_summaries", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("movie_summaries", e))?;
        Ok(rows)
    }

    /// Finds movies whose title equals the query, case-insensitively.
    ///
    /// Several movies may share a title across release years; callers
    /// disambiguate interactively.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_movies_by_title(&self, title: &str) -> Result<Vec<Movie>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT id, title, release_year FROM movies
                 WHERE title LIKE ?1 ESCAPE '\\'
                 ORDER BY release_year",
            )
            .map_err(|e| Error::operation("find_movies_by_title", e))?;
        let movies = stmt
            .query_map(params![escape_like_wildcards(title)], movie_from_row)
            .map_err(|e| Error::operation("find_movies_by_title", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("find_movies_by_title", e))?;
        Ok(movies)
    }

    /// Looks up a star by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_star(&self, name: &str) -> Result<Option<Star>> {
        let conn = acquire_lock(&self.conn);
        conn.query_row(
            "SELECT id, actor_name FROM stars WHERE actor_name = ?1",
            params![name],
            star_from_row,
        )
        .optional()
        .map_err(|e| Error::operation("find_star", e))
    }

    /// All distinct actor names, ordered. Feeds the fuzzy matcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_star_names(&self) -> Result<Vec<String>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare("SELECT DISTINCT actor_name FROM stars ORDER BY actor_name")
            .map_err(|e| Error::operation("all_star_names", e))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::operation("all_star_names", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("all_star_names", e))?;
        Ok(names)
    }

    /// Finds or inserts a movie by title and year.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty title, or an operation
    /// error if the statements fail.
    pub fn insert_movie(&self, title: &str, release_year: i32) -> Result<UpsertResult<Movie>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("movie title is empty".to_string()));
        }

        let conn = acquire_lock(&self.conn);
        let existing = conn
            .query_row(
                "SELECT id, title, release_year FROM movies
                 WHERE title = ?1 AND release_year = ?2",
                params![title, release_year],
                movie_from_row,
            )
            .optional()
            .map_err(|e| Error::operation("insert_movie", e))?;

        if let Some(movie) = existing {
            return Ok(UpsertResult {
                record: movie,
                existed: true,
            });
        }

        conn.execute(
            "INSERT INTO movies (title, release_year) VALUES (?1, ?2)",
            params![title, release_year],
        )
        .map_err(|e| Error::operation("insert_movie", e))?;
        let id = conn.last_insert_rowid();
        tracing::debug!(movie_id = id, title, "inserted movie");

        Ok(UpsertResult {
            record: Movie {
                id: MovieId::new(id),
                title: title.to_string(),
                release_year,
            },
            existed: false,
        })
    }

    /// Finds or inserts a star by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty name, or an operation
    /// error if the statements fail.
    pub fn insert_star(&self, actor_name: &str) -> Result<UpsertResult<Star>> {
        let actor_name = actor_name.trim();
        if actor_name.is_empty() {
            return Err(Error::InvalidInput("actor name is empty".to_string()));
        }

        let conn = acquire_lock(&self.conn);
        let existing = conn
            .query_row(
                "SELECT id, actor_name FROM stars WHERE actor_name = ?1",
                params![actor_name],
                star_from_row,
            )
            .optional()
            .map_err(|e| Error::operation("insert_star", e))?;

        if let Some(star) = existing {
            return Ok(UpsertResult {
                record: star,
                existed: true,
            });
        }

        conn.execute(
            "INSERT INTO stars (actor_name) VALUES (?1)",
            params![actor_name],
        )
        .map_err(|e| Error::operation("insert_star", e))?;
        let id = conn.last_insert_rowid();
        tracing::debug!(star_id = id, actor_name, "inserted star");

        Ok(UpsertResult {
            record: Star {
                id: StarId::new(id),
                actor_name: actor_name.to_string(),
            },
            existed: false,
        })
    }

    /// Links a star to a movie if not already linked.
    ///
    /// # Errors
    ///
    /// Returns an error if the statements fail.
    pub fn link_appearance(&self, movie_id: MovieId, star_id: StarId) -> Result<LinkOutcome> {
        let conn = acquire_lock(&self.conn);
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM appearances WHERE movie_id = ?1 AND star_id = ?2",
                params![movie_id.raw(), star_id.raw()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::operation("link_appearance", e))?;

        if existing.is_some() {
            return Ok(LinkOutcome::AlreadyLinked);
        }

        conn.execute(
            "INSERT INTO appearances (movie_id, star_id) VALUES (?1, ?2)",
            params![movie_id.raw(), star_id.raw()],
        )
        .map_err(|e| Error::operation("link_appearance", e))?;

        Ok(LinkOutcome::Linked {
            appearance_id: conn.last_insert_rowid(),
        })
    }

    /// Actors in a movie, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn actors_for_movie(&self, movie_id: MovieId) -> Result<Vec<String>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT s.actor_name
                 FROM appearances a
                 JOIN stars s ON a.star_id = s.id
                 WHERE a.movie_id = ?1
                 ORDER BY s.actor_name",
            )
            .map_err(|e| Error::operation("actors_for_movie", e))?;
        let names = stmt
            .query_map(params![movie_id.raw()], |row| row.get::<_, String>(0))
            .map_err(|e| Error::operation("actors_for_movie", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("actors_for_movie", e))?;
        Ok(names)
    }

    /// Movies a star appeared in, ordered by year then title.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn movies_for_star(&self, star_id: StarId) -> Result<Vec<Movie>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT m.id, m.title, m.release_year
                 FROM appearances a
                 JOIN movies m ON a.movie_id = m.id
                 WHERE a.star_id = ?1
                 ORDER BY m.release_year, m.title",
            )
            .map_err(|e| Error::operation("movies_for_star", e))?;
        let movies = stmt
            .query_map(params![star_id.raw()], movie_from_row)
            .map_err(|e| Error::operation("movies_for_star", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("movies_for_star", e))?;
        Ok(movies)
    }

    /// The actor with the most appearances, if any appearances exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn top_actor(&self) -> Result<Option<(String, u32)>> {
        let conn = acquire_lock(&self.conn);
        conn.query_row(
            "SELECT s.actor_name, COUNT(*) AS appearance_count
             FROM stars s
             JOIN appearances a ON s.id = a.star_id
             GROUP BY s.actor_name
             ORDER BY appearance_count DESC
             LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|e| Error::operation("top_actor", e))
    }

    /// Movies without any recorded actors, ordered by year then title.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn movies_without_actors(&self) -> Result<Vec<Movie>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT m.id, m.title, m.release_year
                 FROM movies m
                 LEFT JOIN appearances a ON m.id = a.movie_id
                 WHERE a.movie_id IS NULL
                 ORDER BY m.release_year, m.title",
            )
            .map_err(|e| Error::operation("movies_without_actors", e))?;
        let movies = stmt
            .query_map([], movie_from_row)
            .map_err(|e| Error::operation("movies_without_actors", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("movies_without_actors", e))?;
        Ok(movies)
    }

    /// Stars not linked to any movie, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn stars_without_movies(&self) -> Result<Vec<String>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT s.actor_name
                 FROM stars s
                 LEFT JOIN appearances a ON s.id = a.star_id
                 WHERE a.star_id IS NULL
                 ORDER BY s.actor_name",
            )
            .map_err(|e| Error::operation("stars_without_movies", e))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::operation("stars_without_movies", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("stars_without_movies", e))?;
        Ok(names)
    }

    /// Every actor pair that shares at least one movie.
    ///
    /// The `star_id <` join condition reports each pair once, ordered by
    /// shared count descending and then by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn actor_pairs(&self) -> Result<Vec<CollabPair>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT s1.actor_name AS actor_1,
                        s2.actor_name AS actor_2,
                        COUNT(*) AS shared_movies
                 FROM appearances a1
                 JOIN appearances a2
                     ON a1.movie_id = a2.movie_id AND a1.star_id < a2.star_id
                 JOIN stars s1 ON a1.star_id = s1.id
                 JOIN stars s2 ON a2.star_id = s2.id
                 GROUP BY actor_1, actor_2
                 ORDER BY shared_movies DESC, actor_1, actor_2",
            )
            .map_err(|e| Error::operation("actor_pairs", e))?;
        let pairs = stmt
            .query_map([], |row| {
                Ok(CollabPair {
                    actor_1: row.get(0)?,
                    actor_2: row.get(1)?,
                    shared_movies: row.get(2)?,
                })
            })
            .map_err(|e| Error::operation("actor_pairs", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("actor_pairs", e))?;
        Ok(pairs)
    }

    /// Movies with exactly one recorded actor, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn movies_with_one_actor(&self) -> Result<Vec<Movie>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT m.id, m.title, m.release_year
                 FROM movies m
                 JOIN appearances a ON m.id = a.movie_id
                 GROUP BY m.id, m.title, m.release_year
                 HAVING COUNT(a.star_id) = 1
                 ORDER BY m.title",
            )
            .map_err(|e| Error::operation("movies_with_one_actor", e))?;
        let movies = stmt
            .query_map([], movie_from_row)
            .map_err(|e| Error::operation("movies_with_one_actor", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("movies_with_one_actor", e))?;
        Ok(movies)
    }

    /// Appearance count per actor, most roles first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn role_counts(&self) -> Result<Vec<(String, u32)>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT s.actor_name, COUNT(a.movie_id) AS role_count
                 FROM stars s
                 JOIN appearances a ON s.id = a.star_id
                 GROUP BY s.actor_name
                 ORDER BY role_count DESC",
            )
            .map_err(|e| Error::operation("role_counts", e))?;
        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(|e| Error::operation("role_counts", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("role_counts", e))?;
        Ok(counts)
    }

    /// All release years, one entry per movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn release_years(&self) -> Result<Vec<i32>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare("SELECT release_year FROM movies")
            .map_err(|e| Error::operation("release_years", e))?;
        let years = stmt
            .query_map([], |row| row.get::<_, i32>(0))
            .map_err(|e| Error::operation("release_years", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("release_years", e))?;
        Ok(years)
    }

    /// Collaborators of one actor: each co-star with the shared titles
    /// and shared-movie count, most frequent first.
    ///
    /// Title aggregation happens in Rust rather than SQL string
    /// aggregation, keeping titles with embedded commas intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn collaborators_of(&self, actor_name: &str) -> Result<Vec<Collaborator>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT
                     CASE WHEN s1.actor_name = ?1 THEN s2.actor_name
                          ELSE s1.actor_name END AS collaborator,
                     m.title
                 FROM appearances a1
                 JOIN appearances a2
                     ON a1.movie_id = a2.movie_id AND a1.star_id != a2.star_id
                 JOIN stars s1 ON a1.star_id = s1.id
                 JOIN stars s2 ON a2.star_id = s2.id
                 JOIN movies m ON a1.movie_id = m.id
                 WHERE ?1 IN (s1.actor_name, s2.actor_name)
                 ORDER BY collaborator, m.title",
            )
            .map_err(|e| Error::operation("collaborators_of", e))?;

        let rows = stmt
            .query_map(params![actor_name], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| Error::operation("collaborators_of", e))?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()
            .map_err(|e| Error::operation("collaborators_of", e))?;

        let mut titles_by_name: HashMap<String, Vec<String>> = HashMap::new();
        for (name, title) in rows {
            let titles = titles_by_name.entry(name).or_default();
            if !titles.contains(&title) {
                titles.push(title);
            }
        }

        let mut collaborators: Vec<Collaborator> = titles_by_name
            .into_iter()
            .map(|(name, titles)| Collaborator {
                movies: titles.join(", "),
                shared_movies: u32::try_from(titles.len()).unwrap_or(u32::MAX),
                name,
            })
            .collect();
        collaborators.sort_by(|a, b| {
            b.shared_movies
                .cmp(&a.shared_movies)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(collaborators)
    }

    /// Lists every appearance row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_appearances(&self) -> Result<Vec<Appearance>> {
        let conn = acquire_lock(&self.conn);
        let mut stmt = conn
            .prepare("SELECT id, movie_id, star_id FROM appearances ORDER BY id")
            .map_err(|e| Error::operation("list_appearances", e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Appearance {
                    id: row.get(0)?,
                    movie_id: MovieId::new(row.get(1)?),
                    star_id: StarId::new(row.get(2)?),
                })
            })
            .map_err(|e| Error::operation("list_appearances", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::operation("list_appearances", e))?;
        Ok(rows)
    }

    /// Applies a batch of (title, year, actor) links, reporting each outcome.
    ///
    /// Unknown movies and unknown stars are skipped, not created; the bulk
    /// flow only wires up rows that already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup or insert statement fails.
    pub fn bulk_link(
        &self,
        entries: &[BulkLinkEntry],
    ) -> Result<Vec<(BulkLinkEntry, BulkLinkOutcome)>> {
        let mut outcomes = Vec::with_capacity(entries.len());

        for entry in entries {
            let movie = {
                let conn = acquire_lock(&self.conn);
                conn.query_row(
                    "SELECT id, title, release_year FROM movies
                     WHERE title = ?1 AND release_year = ?2",
                    params![entry.title, entry.year],
                    movie_from_row,
                )
                .optional()
                .map_err(|e| Error::operation("bulk_link", e))?
            };

            let Some(movie) = movie else {
                outcomes.push((entry.clone(), BulkLinkOutcome::MovieNotFound));
                continue;
            };

            let Some(star) = self.find_star(&entry.actor)? else {
                outcomes.push((entry.clone(), BulkLinkOutcome::StarNotFound));
                continue;
            };

            let outcome = match self.link_appearance(movie.id, star.id)? {
                LinkOutcome::Linked { appearance_id } => {
                    BulkLinkOutcome::Linked { appearance_id }
                },
                LinkOutcome::AlreadyLinked => BulkLinkOutcome::AlreadyLinked,
            };
            outcomes.push((entry.clone(), outcome));
        }

        Ok(outcomes)
    }
}

fn movie_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: MovieId::new(row.get(0)?),
        title: row.get(1)?,
        release_year: row.get(2)?,
    })
}

fn star_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Star> {
    Ok(Star {
        id: StarId::new(row.get(0)?),
        actor_name: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn seeded_store() -> MovieStore {
        let store = MovieStore::in_memory().unwrap();

        let titanic = store.insert_movie("Titanic", 1997).unwrap().record;
        let juno = store.insert_movie("Juno", 2007).unwrap().record;
        let blended = store.insert_movie("Blended", 2014).unwrap().record;
        store.insert_movie("The Bounty Hunter", 2010).unwrap();

        let kate = store.insert_star("Kate Winslet").unwrap().record;
        let leo = store.insert_star("Leonardo DiCaprio").unwrap().record;
        let elliot = store.insert_star("Elliot Page").unwrap().record;
        let cera = store.insert_star("Michael Cera").unwrap().record;
        let drew = store.insert_star("Drew Barrymore").unwrap().record;
        store.insert_star("Ellie Kemper").unwrap();

        store.link_appearance(titanic.id, kate.id).unwrap();
        store.link_appearance(titanic.id, leo.id).unwrap();
        store.link_appearance(juno.id, elliot.id).unwrap();
        store.link_appearance(juno.id, cera.id).unwrap();
        store.link_appearance(blended.id, drew.id).unwrap();

        store
    }

    #[test]
    fn test_list_tables() {
        let store = MovieStore::in_memory().unwrap();
        let tables = store.list_tables().unwrap();
        assert_eq!(tables, vec!["appearances", "movies", "stars"]);
    }

    #[test]
    fn test_insert_movie_find_or_insert() {
        let store = MovieStore::in_memory().unwrap();
        let first = store.insert_movie("Juno", 2007).unwrap();
        assert!(!first.existed);

        let second = store.insert_movie("Juno", 2007).unwrap();
        assert!(second.existed);
        assert_eq!(second.record.id, first.record.id);

        // Same title in a different year is a different movie
        let remake = store.insert_movie("Juno", 2027).unwrap();
        assert!(!remake.existed);
        assert_ne!(remake.record.id, first.record.id);
    }

    #[test]
    fn test_insert_movie_empty_title() {
        let store = MovieStore::in_memory().unwrap();
        let result = store.insert_movie("   ", 2000);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_link_appearance_dedup() {
        let store = MovieStore::in_memory().unwrap();
        let movie = store.insert_movie("Juno", 2007).unwrap().record;
        let star = store.insert_star("Elliot Page").unwrap().record;

        let first = store.link_appearance(movie.id, star.id).unwrap();
        assert!(matches!(first, LinkOutcome::Linked { .. }));

        let second = store.link_appearance(movie.id, star.id).unwrap();
        assert_eq!(second, LinkOutcome::AlreadyLinked);
        assert_eq!(store.list_appearances().unwrap().len(), 1);
    }

    #[test]
    fn test_movie_summaries_counts_and_order() {
        let store = seeded_store();
        let summaries = store.movie_summaries().unwrap();
        assert_eq!(summaries.len(), 4);

        // Ordered by year: Titanic, Juno, Bounty Hunter, Blended
        assert_eq!(summaries[0].title, "Titanic");
        assert_eq!(summaries[0].actor_count, 2);
        assert_eq!(summaries[2].title, "The Bounty Hunter");
        assert_eq!(summaries[2].actor_count, 0);
    }

    #[test]
    fn test_find_movies_by_title_case_insensitive() {
        let store = seeded_store();
        let matches = store.find_movies_by_title("juno").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Juno");
    }

    #[test]
    fn test_find_movies_by_title_is_exact_not_substring() {
        let store = seeded_store();
        store.insert_movie("Juno Rising", 2015).unwrap();

        // A prefix of another title must not drag it into the match
        let matches = store.find_movies_by_title("Juno").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Juno");

        assert!(store.find_movies_by_title("Jun").unwrap().is_empty());
    }

    #[test]
    fn test_find_movies_by_title_escapes_wildcards() {
        let store = seeded_store();
        // A bare % would match everything if not escaped
        assert!(store.find_movies_by_title("%").unwrap().is_empty());
        assert!(store.find_movies_by_title("Jun_").unwrap().is_empty());
    }

    #[test]
    fn test_cast_and_filmography() {
        let store = seeded_store();
        let titanic = &store.find_movies_by_title("Titanic").unwrap()[0];
        let cast = store.actors_for_movie(titanic.id).unwrap();
        assert_eq!(cast, vec!["Kate Winslet", "Leonardo DiCaprio"]);

        let kate = store.find_star("Kate Winslet").unwrap().unwrap();
        let movies = store.movies_for_star(kate.id).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Titanic");
    }

    #[test]
    fn test_top_actor_empty_database() {
        let store = MovieStore::in_memory().unwrap();
        assert!(store.top_actor().unwrap().is_none());
    }

    #[test]
    fn test_orphan_queries() {
        let store = seeded_store();

        let orphan_movies = store.movies_without_actors().unwrap();
        assert_eq!(orphan_movies.len(), 1);
        assert_eq!(orphan_movies[0].title, "The Bounty Hunter");

        let orphan_stars = store.stars_without_movies().unwrap();
        assert_eq!(orphan_stars, vec!["Ellie Kemper"]);
    }

    #[test]
    fn test_actor_pairs() {
        let store = seeded_store();
        let pairs = store.actor_pairs().unwrap();
        assert_eq!(pairs.len(), 2);
        for pair in &pairs {
            assert_eq!(pair.shared_movies, 1);
        }
        assert!(pairs.iter().any(|p| {
            (p.actor_1 == "Kate Winslet" && p.actor_2 == "Leonardo DiCaprio")
                || (p.actor_1 == "Leonardo DiCaprio" && p.actor_2 == "Kate Winslet")
        }));
    }

    #[test]
    fn test_movies_with_one_actor() {
        let store = seeded_store();
        let solo = store.movies_with_one_actor().unwrap();
        assert_eq!(solo.len(), 1);
        assert_eq!(solo[0].title, "Blended");
    }

    #[test]
    fn test_role_counts_descending() {
        let store = seeded_store();
        let counts = store.role_counts().unwrap();
        assert_eq!(counts.len(), 5);
        assert!(counts.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_collaborators_of() {
        let store = seeded_store();
        let collabs = store.collaborators_of("Kate Winslet").unwrap();
        assert_eq!(collabs.len(), 1);
        assert_eq!(collabs[0].name, "Leonardo DiCaprio");
        assert_eq!(collabs[0].movies, "Titanic");
        assert_eq!(collabs[0].shared_movies, 1);

        // Isolated actor has no collaborators
        assert!(store.collaborators_of("Drew Barrymore").unwrap().is_empty());
    }

    #[test]
    fn test_bulk_link_outcomes() {
        let store = seeded_store();
        let entries = vec![
            BulkLinkEntry {
                title: "Blended".to_string(),
                year: 2014,
                actor: "Drew Barrymore".to_string(),
            },
            BulkLinkEntry {
                title: "Blended".to_string(),
                year: 2014,
                actor: "Adam Sandler".to_string(),
            },
            BulkLinkEntry {
                title: "Missing Movie".to_string(),
                year: 1999,
                actor: "Drew Barrymore".to_string(),
            },
            BulkLinkEntry {
                title: "The Bounty Hunter".to_string(),
                year: 2010,
                actor: "Drew Barrymore".to_string(),
            },
        ];

        let outcomes = store.bulk_link(&entries).unwrap();
        assert_eq!(outcomes[0].1, BulkLinkOutcome::AlreadyLinked);
        assert_eq!(outcomes[1].1, BulkLinkOutcome::StarNotFound);
        assert_eq!(outcomes[2].1, BulkLinkOutcome::MovieNotFound);
        assert!(matches!(outcomes[3].1, BulkLinkOutcome::Linked { .. }));
    }

    #[test]
    fn test_release_years() {
        let store = seeded_store();
        let mut years = store.release_years().unwrap();
        years.sort_unstable();
        assert_eq!(years, vec![1997, 2007, 2010, 2014]);
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.db");
        {
            let store = MovieStore::open(&path).unwrap();
            store.insert_movie("Juno", 2007).unwrap();
            assert_eq!(store.db_path(), Some(path.as_path()));
        }
        // Reopen and verify persistence
        let store = MovieStore::open(&path).unwrap();
        assert_eq!(store.list_movies(MovieSort::None).unwrap().len(), 1);
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("user_name"), "user\\_name");
        assert_eq!(escape_like_wildcards("path\\file"), "path\\\\file");
        assert_eq!(escape_like_wildcards("plain"), "plain");
    }
}
