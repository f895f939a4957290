//! Directed adjacency bookkeeping for a single layout call.
//!
//! [`Adjacency`] records, for every identifier mentioned by an edge, the list of
//! outgoing targets and incoming sources. Edges are stored exactly as given:
//! self-loops and repeated edges between the same pair are kept, and endpoints
//! that are not nodes of the graph are tracked like any other identifier.
//!
//! The structure is built once per call and dropped when the call returns.

use std::collections::HashMap;

use stratum_core::identifier::Id;

/// Outgoing and incoming neighbor lists keyed by node identifier.
#[derive(Debug, Default)]
pub(super) struct Adjacency {
    outgoing: HashMap<Id, Vec<Id>>,
    incoming: HashMap<Id, Vec<Id>>,
    edges_count: usize,
}

impl Adjacency {
    /// Builds the adjacency from `(source, target)` pairs, preserving edge order
    /// inside every neighbor list.
    pub(super) fn from_edges(edges: impl IntoIterator<Item = (Id, Id)>) -> Self {
        let mut adjacency = Self::default();
        for (source, target) in edges {
            adjacency.add_edge(source, target);
        }
        adjacency
    }

    /// Records one directed edge.
    pub(super) fn add_edge(&mut self, source: Id, target: Id) {
        self.outgoing.entry(source).or_default().push(target);
        self.incoming.entry(target).or_default().push(source);
        self.edges_count += 1;
    }

    /// Returns the number of recorded edges, counting repeats.
    pub(super) fn edges_count(&self) -> usize {
        self.edges_count
    }

    /// Returns true if any edge points at `id`.
    pub(super) fn has_incoming(&self, id: Id) -> bool {
        self.incoming
            .get(&id)
            .is_some_and(|sources| !sources.is_empty())
    }

    /// Returns the targets of edges leaving `id`, in edge order.
    ///
    /// Returns an empty iterator if `id` has no outgoing edges.
    pub(super) fn outgoing(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.outgoing.get(&id).into_iter().flatten().copied()
    }

    /// Returns the sources of edges entering `id`, in edge order.
    #[cfg(test)]
    pub(super) fn incoming(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.incoming.get(&id).into_iter().flatten().copied()
    }

    /// Returns the members of `ids` that no edge points at, keeping their order.
    pub(super) fn roots<'n>(&self, ids: impl IntoIterator<Item = &'n Id>) -> Vec<Id> {
        ids.into_iter()
            .copied()
            .filter(|&id| !self.has_incoming(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<Id> {
        names.iter().map(|name| Id::new(name)).collect()
    }

    fn edge(source: &str, target: &str) -> (Id, Id) {
        (Id::new(source), Id::new(target))
    }

    #[test]
    fn test_empty_adjacency() {
        let adjacency = Adjacency::from_edges(Vec::<(Id, Id)>::new());

        assert_eq!(adjacency.edges_count(), 0);
        assert!(!adjacency.has_incoming(Id::new("a")));
        assert_eq!(adjacency.outgoing(Id::new("a")).count(), 0);
    }

    #[test]
    fn test_neighbors_follow_edge_order() {
        let adjacency = Adjacency::from_edges([edge("a", "c"), edge("a", "b"), edge("d", "b")]);

        let targets: Vec<Id> = adjacency.outgoing(Id::new("a")).collect();
        let sources: Vec<Id> = adjacency.incoming(Id::new("b")).collect();
        assert_eq!(targets, ids(&["c", "b"]));
        assert_eq!(sources, ids(&["a", "d"]));
        assert_eq!(adjacency.edges_count(), 3);
    }

    #[test]
    fn test_repeated_edges_are_counted_independently() {
        let adjacency = Adjacency::from_edges([edge("a", "b"), edge("a", "b")]);

        assert_eq!(adjacency.edges_count(), 2);
        assert_eq!(adjacency.outgoing(Id::new("a")).count(), 2);
        assert_eq!(adjacency.incoming(Id::new("b")).count(), 2);
    }

    #[test]
    fn test_self_loop_makes_node_non_root() {
        let adjacency = Adjacency::from_edges([edge("a", "a")]);
        let nodes = ids(&["a", "b"]);

        assert!(adjacency.has_incoming(Id::new("a")));
        assert_eq!(adjacency.roots(&nodes), ids(&["b"]));
    }

    #[test]
    fn test_roots_keep_input_order() {
        let adjacency = Adjacency::from_edges([edge("a", "b"), edge("c", "d")]);
        let nodes = ids(&["d", "c", "b", "a"]);

        assert_eq!(adjacency.roots(&nodes), ids(&["c", "a"]));
    }

    #[test]
    fn test_dangling_source_still_counts_as_incoming() {
        let adjacency = Adjacency::from_edges([edge("ghost", "a")]);
        let nodes = ids(&["a"]);

        assert!(adjacency.roots(&nodes).is_empty());
    }
}
