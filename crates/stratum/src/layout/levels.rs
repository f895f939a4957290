//! Breadth-first level assignment.
//!
//! Levels are computed from the roots of the graph (nodes without incoming
//! edges). All roots form level 0; every following level holds the not yet
//! visited targets of the previous one, deduplicated in discovery order. Nodes
//! the traversal never reaches end up together in one extra level at the end.
//!
//! Graphs without edges, and graphs where every node has an incoming edge,
//! are not layered at all: every node lands in level 0.

use std::{collections::HashSet, fmt};

use indexmap::IndexSet;
use log::{debug, trace};

use stratum_core::identifier::Id;

use super::adjacency::Adjacency;

/// How the levels of a graph were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Layering {
    /// Breadth-first traversal from the roots.
    Breadth,
    /// Edges exist but every node has an incoming edge.
    NoRoots,
    /// The graph has no edges.
    Unlinked,
}

impl fmt::Display for Layering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layering::Breadth => "breadth",
            Layering::NoRoots => "no-roots",
            Layering::Unlinked => "unlinked",
        };
        f.write_str(name)
    }
}

/// Ordered node identifiers per level, level 0 first.
#[derive(Debug)]
pub(super) struct Levels {
    layering: Layering,
    levels: Vec<Vec<Id>>,
}

impl Levels {
    /// Returns how these levels were derived.
    pub(super) fn layering(&self) -> Layering {
        self.layering
    }

    /// Returns the levels in increasing order.
    pub(super) fn as_slice(&self) -> &[Vec<Id>] {
        &self.levels
    }

    /// Returns the number of levels.
    pub(super) fn len(&self) -> usize {
        self.levels.len()
    }

    fn single(layering: Layering, nodes: &IndexSet<Id>) -> Self {
        Self {
            layering,
            levels: vec![nodes.iter().copied().collect()],
        }
    }
}

/// Assigns every node in `nodes` to a level.
///
/// # Arguments
/// * `nodes` - Node identifiers in input order, without duplicates
/// * `adjacency` - Adjacency built from all edges of the call
///
/// # Returns
/// The levels, each listing node identifiers in placement order. Identifiers
/// that only appear as edge endpoints are never part of a level.
pub(super) fn assign_levels(nodes: &IndexSet<Id>, adjacency: &Adjacency) -> Levels {
    if nodes.is_empty() {
        return Levels {
            layering: Layering::Unlinked,
            levels: Vec::new(),
        };
    }

    if adjacency.edges_count() == 0 {
        debug!(nodes_count = nodes.len(); "Graph has no edges, placing all nodes on one level");
        return Levels::single(Layering::Unlinked, nodes);
    }

    let roots = adjacency.roots(nodes);
    if roots.is_empty() {
        debug!(
            nodes_count = nodes.len(),
            edges_count = adjacency.edges_count();
            "Graph has no root node, placing all nodes on one level"
        );
        return Levels::single(Layering::NoRoots, nodes);
    }

    let mut levels = Vec::new();
    let mut visited = HashSet::with_capacity(nodes.len());
    let mut current = roots;

    while !current.is_empty() {
        visited.extend(current.iter().copied());

        let mut next = IndexSet::new();
        for &id in &current {
            next.extend(
                adjacency
                    .outgoing(id)
                    .filter(|target| nodes.contains(target) && !visited.contains(target)),
            );
        }

        trace!(level = levels.len(), nodes_count = current.len(); "Level assigned");
        levels.push(current);
        current = next.into_iter().collect();
    }

    let remaining: Vec<Id> = nodes
        .iter()
        .copied()
        .filter(|id| !visited.contains(id))
        .collect();
    if !remaining.is_empty() {
        debug!(
            nodes_count = remaining.len();
            "Nodes unreachable from any root, appending a final level"
        );
        levels.push(remaining);
    }

    Levels {
        layering: Layering::Breadth,
        levels,
    }
}
