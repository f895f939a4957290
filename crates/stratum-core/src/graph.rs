//! Graph data model shared by the layout engine and its callers.
//!
//! - [`GraphNode`] - an input node: identifier plus an opaque payload
//! - [`GraphEdge`] - an input directed edge between two node identifiers
//! - [`PositionedNode`] - a node with its computed position, ready for rendering
//!
//! All types implement serde traits with the field names the rendering widget
//! expects, so they can be read from and written to JSON directly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{geometry::Point, identifier::Id};

/// Opaque JSON payload carried by a node.
///
/// The layout never inspects it; it is copied to the output unchanged except
/// for the `id` key, which is re-asserted.
pub type Payload = Map<String, Value>;

/// An input node of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    id: Id,
    #[serde(default)]
    data: Payload,
}

impl GraphNode {
    /// Creates a node with an empty payload.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            data: Payload::new(),
        }
    }

    /// Replaces the payload (builder style).
    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = data;
        self
    }

    /// Returns the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the node payload.
    pub fn data(&self) -> &Payload {
        &self.data
    }
}

/// A directed input edge.
///
/// `source` and `target` are optional only because edges may come from
/// loosely-typed JSON; an edge missing either endpoint is rejected by the
/// layout engine before any work is done.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    #[serde(default)]
    source: Option<Id>,
    #[serde(default)]
    target: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl GraphEdge {
    /// Creates an edge from `source` to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratum_core::graph::GraphEdge;
    ///
    /// let edge = GraphEdge::new("Q42", 7u64).with_label("notable work");
    /// assert_eq!(edge.source().unwrap(), "Q42");
    /// assert_eq!(edge.target().unwrap(), "7");
    /// ```
    pub fn new(source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self {
            id: None,
            source: Some(source.into()),
            target: Some(target.into()),
            label: None,
        }
    }

    /// Sets the edge identifier (builder style).
    pub fn with_id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the relationship label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the edge identifier, if the record carried one.
    pub fn id(&self) -> Option<Id> {
        self.id
    }

    /// Returns the source node identifier.
    pub fn source(&self) -> Option<Id> {
        self.source
    }

    /// Returns the target node identifier.
    pub fn target(&self) -> Option<Id> {
        self.target
    }

    /// Returns the relationship label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `(source, target)` when both endpoints are present.
    pub fn endpoints(&self) -> Option<(Id, Id)> {
        self.source.zip(self.target)
    }
}

/// Node kind understood by the rendering widget.
///
/// Layout output always uses [`NodeType::Default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Default,
}

/// A node together with its computed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    id: Id,
    #[serde(rename = "type")]
    node_type: NodeType,
    position: Point,
    data: Payload,
    connectable: bool,
}

impl PositionedNode {
    /// Places `node` at `position`.
    ///
    /// The payload is copied and its `id` key is set to the canonical string
    /// form of the node identifier.
    pub fn new(node: &GraphNode, position: Point) -> Self {
        let mut data = node.data.clone();
        data.insert("id".to_owned(), Value::String(node.id.as_string()));

        Self {
            id: node.id,
            node_type: NodeType::Default,
            position,
            data,
            connectable: true,
        }
    }

    /// Returns the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the node kind.
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the computed position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the payload, including the re-asserted `id`.
    pub fn data(&self) -> &Payload {
        &self.data
    }

    /// Returns whether the renderer should allow connections to this node.
    pub fn connectable(&self) -> bool {
        self.connectable
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_node_deserializes_numeric_id_and_missing_data() {
        let node: GraphNode = serde_json::from_value(json!({"id": 5})).unwrap();

        assert_eq!(node.id(), "5");
        assert!(node.data().is_empty());
    }

    #[test]
    fn test_edge_missing_endpoint_deserializes_as_none() {
        let edge: GraphEdge = serde_json::from_value(json!({"source": "a"})).unwrap();

        assert_eq!(edge.source(), Some(Id::new("a")));
        assert_eq!(edge.target(), None);
        assert_eq!(edge.endpoints(), None);
    }

    #[test]
    fn test_edge_builder() {
        let edge = GraphEdge::new("a", "b").with_id(3u64).with_label("part of");

        assert_eq!(edge.id(), Some(Id::new("3")));
        assert_eq!(edge.label(), Some("part of"));
        assert_eq!(edge.endpoints(), Some((Id::new("a"), Id::new("b"))));
    }

    #[test]
    fn test_positioned_node_reasserts_id_in_payload() {
        let node = GraphNode::new(11u64).with_data(payload(json!({
            "label": "Douglas Adams",
            "id": "stale",
        })));

        let positioned = PositionedNode::new(&node, Point::new(1.0, 2.0));

        assert_eq!(positioned.data()["id"], json!("11"));
        assert_eq!(positioned.data()["label"], json!("Douglas Adams"));
        assert_eq!(node.data()["id"], json!("stale"));
    }

    #[test]
    fn test_positioned_node_serialization() {
        let node = GraphNode::new("Q1");
        let positioned = PositionedNode::new(&node, Point::new(500.0, 300.0));

        let value = serde_json::to_value(&positioned).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "Q1",
                "type": "default",
                "position": {"x": 500.0, "y": 300.0},
                "data": {"id": "Q1"},
                "connectable": true,
            })
        );
    }
}
