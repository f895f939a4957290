//! Hand-off of laid out graphs to the rendering widget.
//!
//! A [`FlowDocument`] bundles the positioned nodes with a normalized edge list
//! (`{id, source, target, label}`), which is what the rendering widget reads.
//! [`Exporter`] implementations turn it into an output format.

use serde::Serialize;

use stratum_core::{
    graph::{GraphEdge, PositionedNode},
    identifier::Id,
};

/// An edge as consumed by the rendering widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    id: String,
    source: Id,
    target: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl FlowEdge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Positioned nodes plus their edges, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDocument {
    nodes: Vec<PositionedNode>,
    edges: Vec<FlowEdge>,
}

impl FlowDocument {
    /// Pairs positioned nodes with the edges of the same graph.
    ///
    /// Edges keep their own identifier when they have one; otherwise the
    /// identifier is derived as `{source}-{target}-{index}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if an edge lacks its source or target.
    pub fn new(nodes: Vec<PositionedNode>, edges: &[GraphEdge]) -> Result<Self, Error> {
        let edges = edges
            .iter()
            .enumerate()
            .map(|(index, edge)| {
                let (source, target) = edge.endpoints().ok_or_else(|| {
                    Error::Render(format!("edge #{index} is missing an endpoint"))
                })?;
                let id = match edge.id() {
                    Some(id) => id.as_string(),
                    None => format!("{source}-{target}-{index}"),
                };
                Ok(FlowEdge {
                    id,
                    source,
                    target,
                    label: edge.label().map(str::to_owned),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self { nodes, edges })
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }
}

/// Serializes a [`FlowDocument`] into an output format.
pub trait Exporter {
    fn export(&self, document: &FlowDocument) -> Result<String, Error>;
}

/// JSON exporter, optionally pretty-printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, document: &FlowDocument) -> Result<String, Error> {
        let result = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        };
        result.map_err(Error::Json)
    }
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}
