//! Input graph documents.
//!
//! A [`GraphDocument`] is the JSON shape the editor's data layer produces for
//! a space: `{"nodes": [...], "edges": [...]}`. The `edges` key may be omitted.

use serde::{Deserialize, Serialize};

use stratum_core::graph::{GraphEdge, GraphNode};

/// Nodes and edges of one graph, as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

impl GraphDocument {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }
}
