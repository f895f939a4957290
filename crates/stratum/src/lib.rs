//! Stratum - layered layout for directed knowledge graphs.
//!
//! Stratum assigns 2D coordinates to the nodes of a directed graph so that a
//! node-link renderer can draw it. Nodes are grouped into levels by a
//! breadth-first traversal from the roots, levels are stacked top to bottom,
//! and each level is spread evenly around a common center.
//!
//! The [`layout`] module exposes the engine itself. [`LayoutBuilder`] wraps the
//! full pipeline for JSON input: parse a graph document, lay it out, and
//! export the hand-off document for the renderer.

pub mod config;
pub mod document;
pub mod export;
pub mod layout;

mod error;

pub use stratum_core::{geometry, graph, identifier};

pub use error::StratumError;

use log::{debug, info, trace};
use rand::{SeedableRng, rngs::StdRng};

use config::AppConfig;
use document::GraphDocument;
use export::{Exporter, FlowDocument, JsonExporter};
use layout::Engine;

/// Builder for laying out Stratum graph documents.
///
/// # Examples
///
/// ```rust
/// use stratum::{LayoutBuilder, config::AppConfig};
///
/// let source = r#"{
///     "nodes": [{"id": 1}, {"id": 2}],
///     "edges": [{"source": 1, "target": 2}]
/// }"#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
///
/// let document = builder.parse(source).expect("Failed to parse");
/// let flow = builder.layout(&document).expect("Failed to lay out");
/// let json = builder.render_json(&flow).expect("Failed to export");
///
/// assert!(json.contains("\"position\""));
/// ```
#[derive(Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a JSON graph document.
    ///
    /// # Arguments
    ///
    /// * `source` - JSON text of the form `{"nodes": [...], "edges": [...]}`
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Parse`] if the text is not a valid graph document.
    pub fn parse(&self, source: &str) -> Result<GraphDocument, StratumError> {
        info!("Parsing graph document");

        let document: GraphDocument = serde_json::from_str(source)
            .map_err(|err| StratumError::new_parse_error(err, source))?;

        debug!(
            nodes_count = document.nodes().len(),
            edges_count = document.edges().len();
            "Graph document parsed successfully"
        );
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Lay out a graph document and pair the result with its edges.
    ///
    /// When the configuration carries a seed, nodes that take the random
    /// fallback placement are positioned reproducibly.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Layout`] for malformed edges or unusable
    /// options, and [`StratumError::Export`] if the edge list cannot be
    /// converted for the renderer.
    pub fn layout(&self, document: &GraphDocument) -> Result<FlowDocument, StratumError> {
        let layout_config = self.config.layout();
        let engine = Engine::new(*layout_config.options());

        info!(nodes_count = document.nodes().len(); "Calculating layout");
        let positioned = match layout_config.seed() {
            Some(seed) => {
                debug!(seed; "Using seeded fallback placement");
                engine.calculate_with_rng(
                    document.nodes(),
                    document.edges(),
                    &mut StdRng::seed_from_u64(seed),
                )?
            }
            None => engine.calculate(document.nodes(), document.edges())?,
        };

        let flow = FlowDocument::new(positioned, document.edges())?;
        info!(nodes_count = flow.nodes().len(), edges_count = flow.edges().len(); "Layout calculated");

        Ok(flow)
    }

    /// Render a laid out document to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Export`] if serialization fails.
    pub fn render_json(&self, flow: &FlowDocument) -> Result<String, StratumError> {
        let exporter = JsonExporter::new(self.config.export().pretty());
        let json = exporter.export(flow)?;

        info!("JSON rendered successfully");
        Ok(json)
    }
}
