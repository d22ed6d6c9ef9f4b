//! CLI command implementations.
//!
//! Each submodule implements one group of subcommands:
//!
//! | Module | Commands |
//! |--------|----------|
//! | `core` | `tables`, `movies`, `star`, `cast`, `filmography` |
//! | `edit` | `add`, `link` (including `--from-csv` bulk mode) |
//! | `stats` | `stats top-actor/orphan-movies/orphan-stars/pairs/solo` |
//! | `collab` | `collab summary/map/network` |
//! | `chart` | `chart years/roles/timeline/treemap/decades` |
//! | `menu` | the interactive numbered menu loop |
//!
//! Interactive flows read answers line-by-line from stdin; every prompt
//! can be bypassed by passing the answer as a flag.

mod chart;
mod collab;
mod core;
mod edit;
mod menu;
mod stats;

pub use chart::{ChartKind, cmd_chart};
pub use collab::{cmd_collab_map, cmd_collab_network, cmd_collab_summary};
pub use core::{cmd_cast, cmd_filmography, cmd_movies, cmd_star, cmd_tables, MoviesFormat};
pub use edit::{cmd_add, cmd_link, cmd_link_csv, read_bulk_entries};
pub use menu::cmd_menu;
pub use stats::{cmd_stats_orphan_movies, cmd_stats_orphan_stars, cmd_stats_pairs, cmd_stats_solo, cmd_stats_top_actor};

use crate::matching;
use crate::models::Movie;
use crate::storage::MovieStore;
use crate::{Error, Result};
use std::io::{self, Write};

/// Boxed-error result used at the command boundary.
pub type CommandResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Prompts on stdout and reads one trimmed line from stdin.
fn prompt(text: &str) -> Result<String> {
    print!("{text}");
    io::stdout()
        .flush()
        .map_err(|e| Error::operation("flush_stdout", e))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| Error::operation("read_stdin", e))?;
    Ok(input.trim().to_string())
}

/// Asks a yes/no question; Enter defaults to yes.
fn confirm(text: &str) -> Result<bool> {
    let answer = prompt(&format!("{text} [Y/n]: "))?;
    Ok(answer.is_empty()
        || answer.eq_ignore_ascii_case("y")
        || answer.eq_ignore_ascii_case("yes"))
}

/// Resolves a title to a single movie, prompting when several match.
///
/// Returns `None` (after printing why) when nothing matches or the
/// selection is invalid.
fn choose_movie(store: &MovieStore, title: &str) -> Result<Option<Movie>> {
    let matches = store.find_movies_by_title(title)?;

    match matches.len() {
        0 => {
            println!("No movie found with title: {title}");
            Ok(None)
        },
        1 => Ok(matches.into_iter().next()),
        _ => {
            println!("Multiple movies found for '{title}':");
            for (i, movie) in matches.iter().enumerate() {
                println!("  {}. {}", i + 1, movie.label());
            }
            let selection = prompt("Select movie number: ")?;
            let Ok(index) = selection.parse::<usize>() else {
                println!("Invalid selection.");
                return Ok(None);
            };
            if index == 0 || index > matches.len() {
                println!("Invalid selection.");
                return Ok(None);
            }
            Ok(Some(matches[index - 1].clone()))
        },
    }
}

/// Resolves a typed actor name against the star list.
///
/// Exact matches pass through; otherwise the best fuzzy candidate above
/// the threshold is offered for confirmation. Returns `None` when no
/// acceptable name is found or the suggestion is declined.
fn resolve_actor(store: &MovieStore, input: &str) -> Result<Option<String>> {
    let names = store.all_star_names()?;
    if names.iter().any(|n| n == input) {
        return Ok(Some(input.to_string()));
    }

    match matching::suggest(input, &names) {
        Some(m) => {
            if confirm(&format!("Did you mean '{}'?", m.name))? {
                Ok(Some(m.name))
            } else {
                println!("No actor selected.");
                Ok(None)
            }
        },
        None => {
            println!("Actor not found: {input}");
            Ok(None)
        },
    }
}

#[cfg(test)]
mod tests {
    // The interactive helpers read from the process stdin; their
    // non-interactive pieces (fuzzy resolution, disambiguation queries)
    // are covered through the storage and matching module tests plus the
    // integration tests.
}
