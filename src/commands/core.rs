//! Core read-only commands: tables, movies, star, cast, filmography.

use super::{CommandResult, choose_movie, resolve_actor};
use crate::models::MovieSort;
use crate::rendering;
use crate::storage::MovieStore;
use std::path::Path;

/// Output format for the movie listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoviesFormat {
    /// Console table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl MoviesFormat {
    /// Parses a format string; unknown values fall back to table.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// `tables` command: connection smoke test plus the table list.
pub fn cmd_tables(store: &MovieStore) -> CommandResult {
    println!("Connection successful!");
    println!("SQLite version: {}", store.sqlite_version());

    let tables = store.list_tables()?;
    if tables.is_empty() {
        println!("No tables found in the database.");
    } else {
        println!("Tables in the database:");
        for table in &tables {
            println!("  - {table}");
        }
    }
    Ok(())
}

/// `movies` command: the summary listing, optionally sorted, as a table
/// or JSON, with an optional Markdown export.
pub fn cmd_movies(
    store: &MovieStore,
    sort: MovieSort,
    format: MoviesFormat,
    markdown: Option<&Path>,
) -> CommandResult {
    // The export always carries actor counts, whichever sort was asked for.
    if let Some(path) = markdown {
        let mut summaries = store.movie_summaries()?;
        match sort {
            MovieSort::Name => summaries.sort_by(|a, b| a.title.cmp(&b.title)),
            // The summary query already orders by year then title.
            MovieSort::Year | MovieSort::None => {},
        }
        std::fs::write(path, rendering::movie_summaries_markdown(&summaries))?;
        println!("Markdown export saved to: {}", path.display());
        return Ok(());
    }

    // The summary query fixes its own order; explicit sorts list raw rows.
    if sort == MovieSort::None {
        let summaries = store.movie_summaries()?;

        match format {
            MoviesFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            },
            MoviesFormat::Table => {
                println!("{}", rendering::movie_summary_table(&summaries));
            },
        }
        return Ok(());
    }

    let movies = store.list_movies(sort)?;
    match format {
        MoviesFormat::Json => println!("{}", serde_json::to_string_pretty(&movies)?),
        MoviesFormat::Table => {
            for movie in &movies {
                println!("  - {}", movie.label());
            }
        },
    }
    Ok(())
}

/// `star` command: exact name search.
pub fn cmd_star(store: &MovieStore, name: &str) -> CommandResult {
    match store.find_star(name)? {
        Some(star) => {
            println!("{} (ID {})", star.actor_name, star.id);
        },
        None => {
            println!("{name} not found in list.");
        },
    }
    Ok(())
}

/// `cast` command: actors for a movie, with title disambiguation.
pub fn cmd_cast(store: &MovieStore, title: &str) -> CommandResult {
    let Some(movie) = choose_movie(store, title)? else {
        return Ok(());
    };

    let actors = store.actors_for_movie(movie.id)?;
    println!("\nMovie: {}", movie.label());
    if actors.is_empty() {
        println!("No actors recorded for this movie.");
    } else {
        println!("Actors in this movie:");
        for actor in &actors {
            println!("  - {actor}");
        }
    }
    Ok(())
}

/// `filmography` command: movies for an actor, fuzzy-resolving the name.
pub fn cmd_filmography(store: &MovieStore, name: &str) -> CommandResult {
    let Some(resolved) = resolve_actor(store, name)? else {
        return Ok(());
    };
    let Some(star) = store.find_star(&resolved)? else {
        println!("Actor not found: {resolved}");
        return Ok(());
    };

    let movies = store.movies_for_star(star.id)?;
    println!("\nActor: {resolved}");
    if movies.is_empty() {
        println!("No movies recorded for this actor.");
    } else {
        println!("Movies featuring this actor:");
        for movie in &movies {
            println!("  - {}", movie.label());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("json", MoviesFormat::Json; "lowercase json")]
    #[test_case("JSON", MoviesFormat::Json; "uppercase json")]
    #[test_case("table", MoviesFormat::Table; "table keyword")]
    #[test_case("anything", MoviesFormat::Table; "unknown falls back")]
    fn test_movies_format_parse(input: &str, expected: MoviesFormat) {
        assert_eq!(MoviesFormat::parse(input), expected);
    }
}
