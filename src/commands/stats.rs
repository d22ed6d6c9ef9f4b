//! Dataset statistics commands.

use super::{CommandResult, prompt};
use crate::storage::MovieStore;

/// `stats top-actor`: the actor with the most appearances.
pub fn cmd_stats_top_actor(store: &MovieStore) -> CommandResult {
    match store.top_actor()? {
        Some((name, count)) => {
            println!("Actor with most appearances: {name} ({count} movies)");
        },
        None => println!("No appearances found."),
    }
    Ok(())
}

/// `stats orphan-movies`: movies with no recorded actors.
pub fn cmd_stats_orphan_movies(store: &MovieStore) -> CommandResult {
    let movies = store.movies_without_actors()?;
    println!("Movies without any recorded actors:");
    if movies.is_empty() {
        println!("  All movies have at least one actor listed.");
    } else {
        for movie in &movies {
            println!("  - {}", movie.label());
        }
    }
    Ok(())
}

/// `stats orphan-stars`: stars not linked to any movie.
pub fn cmd_stats_orphan_stars(store: &MovieStore) -> CommandResult {
    let names = store.stars_without_movies()?;
    println!("Actors not linked to any movies:");
    if names.is_empty() {
        println!("  All actors are linked to at least one movie.");
    } else {
        for name in &names {
            println!("  - {name}");
        }
    }
    Ok(())
}

/// `stats pairs`: every actor pair that has worked together.
pub fn cmd_stats_pairs(store: &MovieStore) -> CommandResult {
    let pairs = store.actor_pairs()?;
    println!("Actor pairs who have worked together:");
    if pairs.is_empty() {
        println!("  No actor pairs found.");
    } else {
        for pair in &pairs {
            println!(
                "  - {} & {} ({} movie(s))",
                pair.actor_1, pair.actor_2, pair.shared_movies
            );
        }
    }
    Ok(())
}

/// `stats solo`: single-actor movies, with an interactive loop to add
/// more cast members to one of them.
pub fn cmd_stats_solo(store: &MovieStore) -> CommandResult {
    let movies = store.movies_with_one_actor()?;
    if movies.is_empty() {
        println!("All movies have more than one actor.");
        return Ok(());
    }

    println!("Movies with only one actor:");
    for (i, movie) in movies.iter().enumerate() {
        println!("  {}. {}", i + 1, movie.label());
    }

    let selection = prompt("Select a movie by number (or Enter to quit): ")?;
    if selection.is_empty() {
        return Ok(());
    }
    let Ok(index) = selection.parse::<usize>() else {
        println!("Invalid selection.");
        return Ok(());
    };
    if index == 0 || index > movies.len() {
        println!("Invalid selection.");
        return Ok(());
    }

    let movie = &movies[index - 1];
    println!("Adding actors to '{}' (Movie ID: {})", movie.title, movie.id);
    loop {
        let actor_name = prompt("Enter actor name (or press Enter to finish): ")?;
        if actor_name.is_empty() {
            break;
        }
        let star = store.insert_star(&actor_name)?;
        store.link_appearance(movie.id, star.record.id)?;
        println!("Added {actor_name}");
    }
    Ok(())
}
