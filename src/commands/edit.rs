//! Insert commands: `add` and `link`.

use super::{CommandResult, choose_movie, prompt};
use crate::models::{BulkLinkEntry, BulkLinkOutcome, LinkOutcome};
use crate::storage::MovieStore;
use crate::{Error, Result};
use std::path::Path;

/// `add` command: interactive movie + star + appearance insert.
///
/// Flag values take precedence; anything missing is prompted for.
pub fn cmd_add(
    store: &MovieStore,
    title: Option<String>,
    year: Option<i32>,
    star: Option<String>,
) -> CommandResult {
    let title = match title {
        Some(t) => t,
        None => prompt("Movie title: ")?,
    };
    let year = match year {
        Some(y) => y,
        None => {
            let raw = prompt("Release year: ")?;
            match raw.parse::<i32>() {
                Ok(y) => y,
                Err(_) => {
                    println!("Release year must be a number. Please try again.");
                    return Ok(());
                },
            }
        },
    };
    let star_name = match star {
        Some(s) => s,
        None => prompt("Star's name: ")?,
    };

    if title.trim().is_empty() || star_name.trim().is_empty() {
        println!("All fields are required. Please try again.");
        return Ok(());
    }

    let movie = store.insert_movie(&title, year)?;
    if movie.existed {
        println!(
            "Movie '{}' already exists (ID {}).",
            movie.record.title, movie.record.id
        );
    } else {
        println!(
            "Inserted movie '{}' (ID {}).",
            movie.record.title, movie.record.id
        );
    }

    let star = store.insert_star(&star_name)?;
    if star.existed {
        println!(
            "Star '{}' already exists (ID {}).",
            star.record.actor_name, star.record.id
        );
    } else {
        println!(
            "Inserted new star '{}' (ID {}).",
            star.record.actor_name, star.record.id
        );
    }

    match store.link_appearance(movie.record.id, star.record.id)? {
        LinkOutcome::Linked { appearance_id } => {
            println!(
                "Linked appearance (ID {appearance_id}) of '{}' in '{}'.",
                star.record.actor_name, movie.record.title
            );
        },
        LinkOutcome::AlreadyLinked => {
            println!(
                "Appearance already recorded for '{}' in '{}'.",
                star.record.actor_name, movie.record.title
            );
        },
    }
    Ok(())
}

/// `link` command: attach a list of actors to an existing movie,
/// inserting stars the database has not seen before.
pub fn cmd_link(store: &MovieStore, title: &str, actors: &[String]) -> CommandResult {
    let Some(movie) = choose_movie(store, title)? else {
        return Ok(());
    };

    for actor_name in actors {
        let actor_name = actor_name.trim();
        if actor_name.is_empty() {
            continue;
        }

        let star = store.insert_star(actor_name)?;
        if star.existed {
            println!(
                "Found existing star: {} (ID {})",
                star.record.actor_name, star.record.id
            );
        } else {
            println!(
                "Inserted new star: {} (ID {})",
                star.record.actor_name, star.record.id
            );
        }

        match store.link_appearance(movie.id, star.record.id)? {
            LinkOutcome::Linked { appearance_id } => {
                println!(
                    "Linked {} to '{}' (Appearance ID: {appearance_id})",
                    star.record.actor_name, movie.title
                );
            },
            LinkOutcome::AlreadyLinked => {
                println!("Already linked: {} in '{}'", star.record.actor_name, movie.title);
            },
        }
    }
    Ok(())
}

/// `link --from-csv` command: bulk-link appearances from a CSV file.
pub fn cmd_link_csv(store: &MovieStore, path: &Path) -> CommandResult {
    let entries = read_bulk_entries(path)?;
    if entries.is_empty() {
        println!("No entries in {}", path.display());
        return Ok(());
    }

    let outcomes = store.bulk_link(&entries)?;
    for (entry, outcome) in &outcomes {
        match outcome {
            BulkLinkOutcome::Linked { appearance_id } => {
                println!(
                    "Linked {} to '{}' (ID: {appearance_id})",
                    entry.actor, entry.title
                );
            },
            BulkLinkOutcome::AlreadyLinked => {
                println!("Appearance already exists: {} in '{}'", entry.actor, entry.title);
            },
            BulkLinkOutcome::MovieNotFound => {
                println!("Movie not found: {} ({})", entry.title, entry.year);
            },
            BulkLinkOutcome::StarNotFound => {
                println!("Star not found: {}", entry.actor);
            },
        }
    }
    Ok(())
}

/// Reads bulk-link entries from a CSV file with a
/// `title,year,actor` header.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for rows that do not deserialize, or
/// an operation error if the file cannot be read.
pub fn read_bulk_entries(path: &Path) -> Result<Vec<BulkLinkEntry>> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| Error::operation("open_csv", e))?;

    let mut entries = Vec::new();
    for (i, record) in reader.deserialize::<BulkLinkEntry>().enumerate() {
        let entry =
            record.map_err(|e| Error::InvalidInput(format!("CSV row {}: {e}", i + 2)))?;
        entries.push(entry);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_bulk_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appearances.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "title,year,actor").unwrap();
        writeln!(file, "Titanic,1997,Kate Winslet").unwrap();
        writeln!(file, "Juno,2007,Michael Cera").unwrap();

        let entries = read_bulk_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Titanic");
        assert_eq!(entries[0].year, 1997);
        assert_eq!(entries[1].actor, "Michael Cera");
    }

    #[test]
    fn test_read_bulk_entries_bad_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "title,year,actor").unwrap();
        writeln!(file, "Titanic,not-a-year,Kate Winslet").unwrap();

        let result = read_bulk_entries(&path);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_read_bulk_entries_missing_file() {
        let result = read_bulk_entries(Path::new("/nonexistent/file.csv"));
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }
}
