//! Collaboration commands: summary, per-actor map, whole network.

use super::{CommandResult, resolve_actor};
use crate::graph::{self, CollabGraph, EgoNetwork};
use crate::storage::MovieStore;
use std::path::Path;

/// `collab summary`: each actor's co-stars, most frequent first.
pub fn cmd_collab_summary(store: &MovieStore) -> CommandResult {
    let pairs = store.actor_pairs()?;
    if pairs.is_empty() {
        println!("No collaboration data found.");
        return Ok(());
    }

    for (actor, collabs) in graph::collaborator_map(&pairs) {
        println!("\nActor: {actor}");
        for (coactor, count) in collabs {
            println!("  - {coactor} ({count})");
        }
    }
    Ok(())
}

/// `collab map <actor>`: the two-ring ego network, written as dot source.
pub fn cmd_collab_map(store: &MovieStore, name: &str, output: &Path) -> CommandResult {
    let Some(actor) = resolve_actor(store, name)? else {
        return Ok(());
    };

    println!("\nBuilding graph for {actor}...");
    let ego = EgoNetwork::build(store, &actor)?;
    let summary = ego.summary();
    println!("Graph includes:");
    println!("  - {} actors", summary.actors);
    println!("  - {} relationships", summary.relationships);

    std::fs::write(output, ego.to_dot())?;
    println!(
        "\nGraphviz source saved to: {} (render with `dot -Tsvg`)",
        output.display()
    );
    Ok(())
}

/// `collab network`: the whole collaboration network, written as dot source.
pub fn cmd_collab_network(store: &MovieStore, output: &Path) -> CommandResult {
    let pairs = store.actor_pairs()?;
    if pairs.is_empty() {
        println!("No data to display.");
        return Ok(());
    }

    let graph = CollabGraph::from_pairs(&pairs);
    let summary = graph.summary();
    println!(
        "Network includes {} actors and {} relationships",
        summary.actors, summary.relationships
    );

    std::fs::write(output, graph.to_dot())?;
    println!(
        "Graphviz source saved to: {} (render with `dot -Tsvg`)",
        output.display()
    );
    Ok(())
}
