//! The interactive numbered menu.

use super::{CommandResult, core, edit, prompt};
use crate::storage::MovieStore;

/// `menu` command: loop over the numbered choices until exit.
///
/// Each choice runs one of the regular subcommands with prompted
/// arguments.
pub fn cmd_menu(store: &MovieStore) -> CommandResult {
    loop {
        println!("\nMovie Database Menu");
        println!("1. Test connection and list tables");
        println!("2. Add a new movie and star");
        println!("3. Add one or more actors to an existing movie");
        println!("4. View actors for a movie");
        println!("5. View movies for an actor");
        println!("6. Exit");

        let choice = prompt("Enter your choice (1-6): ")?;
        match choice.as_str() {
            "1" => core::cmd_tables(store)?,
            "2" => edit::cmd_add(store, None, None, None)?,
            "3" => {
                let title = prompt("Movie title: ")?;
                let actors = prompt("Enter actor names (comma-separated): ")?;
                if title.is_empty() || actors.is_empty() {
                    println!("Both title and actor list are required.");
                    continue;
                }
                let actor_list: Vec<String> =
                    actors.split(',').map(|s| s.trim().to_string()).collect();
                edit::cmd_link(store, &title, &actor_list)?;
            },
            "4" => {
                let title = prompt("Movie title: ")?;
                if title.is_empty() {
                    println!("Title is required.");
                    continue;
                }
                core::cmd_cast(store, &title)?;
            },
            "5" => {
                let name = prompt("Actor's name: ")?;
                if name.is_empty() {
                    println!("Actor name is required.");
                    continue;
                }
                core::cmd_filmography(store, &name)?;
            },
            "6" => {
                println!("Goodbye!");
                return Ok(());
            },
            _ => println!("Invalid choice. Please enter a number from 1 to 6."),
        }
    }
}
