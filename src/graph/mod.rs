//! Collaboration graphs over the appearance data.
//!
//! Two shapes are built on `petgraph`:
//! - [`CollabGraph`] — the whole network, one node per actor, edges
//!   weighted by shared-movie count.
//! - [`EgoNetwork`] — a two-ring map around one actor: the center, their
//!   direct collaborators, and the collaborators of those collaborators.
//!
//! Layout is delegated to Graphviz; [`CollabGraph::to_dot`] and
//! [`EgoNetwork::to_dot`] emit `dot` source the caller writes to a file
//! or pipes to the external tool.

use crate::models::CollabPair;
use crate::storage::MovieStore;
use crate::Result;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Edge payload: shared-movie count plus the joined title list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeInfo {
    /// Number of movies both endpoints appeared in.
    pub shared_movies: u32,
    /// Comma-joined shared titles (empty when unknown).
    pub movies: String,
}

/// Ring of an ego-network node relative to the center actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// The queried actor.
    Center,
    /// A direct collaborator.
    Direct,
    /// A collaborator of a collaborator.
    Extended,
}

impl Layer {
    /// Graphviz fill color for the layer.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Center => "deepskyblue",
            Self::Direct => "mediumseagreen",
            Self::Extended => "lightgray",
        }
    }
}

/// Node and edge counts for console reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSummary {
    /// Number of actors in the graph.
    pub actors: usize,
    /// Number of collaboration edges.
    pub relationships: usize,
}

/// The whole collaboration network.
pub struct CollabGraph {
    graph: UnGraph<String, EdgeInfo>,
}

impl CollabGraph {
    /// Builds the network from deduplicated actor pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[CollabPair]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

        for pair in pairs {
            let a = node_for(&mut graph, &mut nodes, &pair.actor_1);
            let b = node_for(&mut graph, &mut nodes, &pair.actor_2);
            graph.add_edge(
                a,
                b,
                EdgeInfo {
                    shared_movies: pair.shared_movies,
                    movies: String::new(),
                },
            );
        }

        Self { graph }
    }

    /// Node and edge counts.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            actors: self.graph.node_count(),
            relationships: self.graph.edge_count(),
        }
    }

    /// Emits Graphviz source for the network.
    ///
    /// Edge pen width scales with the shared-movie count so frequent
    /// collaborations read thicker.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from(
            "graph collaborations {\n  layout=neato;\n  overlap=false;\n  \
             node [shape=ellipse, style=filled, fillcolor=lightblue, fontsize=10];\n",
        );
        for idx in self.graph.node_indices() {
            let _ = writeln!(
                dot,
                "  n{} [label=\"{}\"];",
                idx.index(),
                escape_label(&self.graph[idx])
            );
        }
        for edge in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                let info = &self.graph[edge];
                let _ = writeln!(
                    dot,
                    "  n{} -- n{} [penwidth={}];",
                    a.index(),
                    b.index(),
                    info.shared_movies
                );
            }
        }
        dot.push_str("}\n");
        dot
    }
}

/// Two-ring collaboration map around one actor.
pub struct EgoNetwork {
    graph: UnGraph<String, EdgeInfo>,
    layers: HashMap<NodeIndex, Layer>,
    center: String,
}

impl EgoNetwork {
    /// Builds the two-ring network for `center` from the store.
    ///
    /// Ring 1 is everyone the center shares a movie with; ring 2 adds
    /// the collaborators of ring-1 actors, skipping anyone already in
    /// ring 0 or 1 so each actor keeps its first (closest) ring.
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator queries fail.
    pub fn build(store: &MovieStore, center: &str) -> Result<Self> {
        let mut graph = UnGraph::new_undirected();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();
        let mut layers: HashMap<NodeIndex, Layer> = HashMap::new();

        let center_idx = node_for(&mut graph, &mut nodes, center);
        layers.insert(center_idx, Layer::Center);

        let first_degree = store.collaborators_of(center)?;
        let mut ring1: Vec<String> = Vec::with_capacity(first_degree.len());

        for collab in &first_degree {
            let idx = node_for(&mut graph, &mut nodes, &collab.name);
            layers.insert(idx, Layer::Direct);
            graph.add_edge(
                center_idx,
                idx,
                EdgeInfo {
                    shared_movies: collab.shared_movies,
                    movies: collab.movies.clone(),
                },
            );
            ring1.push(collab.name.clone());
        }

        for actor in &ring1 {
            let second_degree = store.collaborators_of(actor)?;
            let actor_idx = nodes[actor];
            for collab in &second_degree {
                if collab.name == center || ring1.contains(&collab.name) {
                    continue;
                }
                let idx = node_for(&mut graph, &mut nodes, &collab.name);
                layers.entry(idx).or_insert(Layer::Extended);
                graph.add_edge(
                    actor_idx,
                    idx,
                    EdgeInfo {
                        shared_movies: collab.shared_movies,
                        movies: collab.movies.clone(),
                    },
                );
            }
        }

        Ok(Self {
            graph,
            layers,
            center: center.to_string(),
        })
    }

    /// The center actor's name.
    #[must_use]
    pub fn center(&self) -> &str {
        &self.center
    }

    /// Node and edge counts.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            actors: self.graph.node_count(),
            relationships: self.graph.edge_count(),
        }
    }

    /// Returns the layer of a named actor, if present in the network.
    #[must_use]
    pub fn layer_of(&self, name: &str) -> Option<Layer> {
        self.graph
            .node_indices()
            .find(|idx| self.graph[*idx] == name)
            .and_then(|idx| self.layers.get(&idx).copied())
    }

    /// Emits Graphviz source with layer colors and shared-title edge labels.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from(
            "graph ego {\n  layout=neato;\n  overlap=false;\n  \
             node [shape=ellipse, style=filled, fontsize=10];\n",
        );
        let _ = writeln!(
            dot,
            "  label=\"Actor Collaboration Map: {}\";",
            escape_label(&self.center)
        );
        for idx in self.graph.node_indices() {
            let layer = self.layers.get(&idx).copied().unwrap_or(Layer::Extended);
            let _ = writeln!(
                dot,
                "  n{} [label=\"{}\", fillcolor={}];",
                idx.index(),
                escape_label(&self.graph[idx]),
                layer.color()
            );
        }
        for edge in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                let info = &self.graph[edge];
                let _ = writeln!(
                    dot,
                    "  n{} -- n{} [penwidth={}, label=\"{}\", fontsize=7];",
                    a.index(),
                    b.index(),
                    info.shared_movies,
                    escape_label(&info.movies)
                );
            }
        }
        dot.push_str("}\n");
        dot
    }
}

/// Symmetric collaborator adjacency for the console summary.
///
/// Each pair contributes to both endpoints; per-actor lists sort by
/// shared count descending.
#[must_use]
pub fn collaborator_map(pairs: &[CollabPair]) -> Vec<(String, Vec<(String, u32)>)> {
    let mut map: HashMap<String, Vec<(String, u32)>> = HashMap::new();
    for pair in pairs {
        map.entry(pair.actor_1.clone())
            .or_default()
            .push((pair.actor_2.clone(), pair.shared_movies));
        map.entry(pair.actor_2.clone())
            .or_default()
            .push((pair.actor_1.clone(), pair.shared_movies));
    }

    let mut entries: Vec<(String, Vec<(String, u32)>)> = map.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, collabs) in &mut entries {
        collabs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    }
    entries
}

fn node_for(
    graph: &mut UnGraph<String, EdgeInfo>,
    nodes: &mut HashMap<String, NodeIndex>,
    name: &str,
) -> NodeIndex {
    if let Some(idx) = nodes.get(name) {
        return *idx;
    }
    let idx = graph.add_node(name.to_string());
    nodes.insert(name.to_string(), idx);
    idx
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::BulkLinkEntry;

    fn pairs() -> Vec<CollabPair> {
        vec![
            CollabPair {
                actor_1: "Kate Winslet".to_string(),
                actor_2: "Leonardo DiCaprio".to_string(),
                shared_movies: 2,
            },
            CollabPair {
                actor_1: "Elliot Page".to_string(),
                actor_2: "Michael Cera".to_string(),
                shared_movies: 1,
            },
        ]
    }

    #[test]
    fn test_collab_graph_counts() {
        let graph = CollabGraph::from_pairs(&pairs());
        let summary = graph.summary();
        assert_eq!(summary.actors, 4);
        assert_eq!(summary.relationships, 2);
    }

    #[test]
    fn test_collab_graph_dot_output() {
        let dot = CollabGraph::from_pairs(&pairs()).to_dot();
        assert!(dot.starts_with("graph collaborations {"));
        assert!(dot.contains("Kate Winslet"));
        assert!(dot.contains("penwidth=2"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_collaborator_map_symmetric() {
        let map = collaborator_map(&pairs());
        assert_eq!(map.len(), 4);
        let kate = map.iter().find(|(name, _)| name == "Kate Winslet").unwrap();
        assert_eq!(kate.1, vec![("Leonardo DiCaprio".to_string(), 2)]);
        let leo = map
            .iter()
            .find(|(name, _)| name == "Leonardo DiCaprio")
            .unwrap();
        assert_eq!(leo.1, vec![("Kate Winslet".to_string(), 2)]);
    }

    fn seeded_store() -> MovieStore {
        let store = MovieStore::in_memory().unwrap();
        for (title, year, cast) in [
            ("Titanic", 1997, vec!["Kate Winslet", "Leonardo DiCaprio"]),
            ("Revolutionary Road", 2008, vec!["Kate Winslet", "Leonardo DiCaprio"]),
            ("The Departed", 2006, vec!["Leonardo DiCaprio", "Matt Damon"]),
            ("Good Will Hunting", 1997, vec!["Matt Damon", "Ben Affleck"]),
        ] {
            let movie = store.insert_movie(title, year).unwrap().record;
            for name in cast {
                let star = store.insert_star(name).unwrap().record;
                store.link_appearance(movie.id, star.id).unwrap();
            }
        }
        // Exercise graph build against bulk-linked data too
        store
            .bulk_link(&[BulkLinkEntry {
                title: "The Departed".to_string(),
                year: 2006,
                actor: "Matt Damon".to_string(),
            }])
            .unwrap();
        store
    }

    #[test]
    fn test_ego_network_layers() {
        let store = seeded_store();
        let ego = EgoNetwork::build(&store, "Kate Winslet").unwrap();

        assert_eq!(ego.layer_of("Kate Winslet"), Some(Layer::Center));
        assert_eq!(ego.layer_of("Leonardo DiCaprio"), Some(Layer::Direct));
        // Matt Damon is reachable only through Leo
        assert_eq!(ego.layer_of("Matt Damon"), Some(Layer::Extended));
        // Ben Affleck is three hops out, not part of the two-ring map
        assert_eq!(ego.layer_of("Ben Affleck"), None);

        let summary = ego.summary();
        assert_eq!(summary.actors, 3);
        assert_eq!(summary.relationships, 2);
    }

    #[test]
    fn test_ego_network_dot_colors() {
        let store = seeded_store();
        let ego = EgoNetwork::build(&store, "Kate Winslet").unwrap();
        let dot = ego.to_dot();
        assert!(dot.contains("deepskyblue"));
        assert!(dot.contains("mediumseagreen"));
        assert!(dot.contains("lightgray"));
        assert!(dot.contains("Actor Collaboration Map: Kate Winslet"));
    }

    #[test]
    fn test_ego_network_unknown_actor_is_lone_node() {
        let store = seeded_store();
        let ego = EgoNetwork::build(&store, "Nobody").unwrap();
        let summary = ego.summary();
        assert_eq!(summary.actors, 1);
        assert_eq!(summary.relationships, 0);
    }
}
