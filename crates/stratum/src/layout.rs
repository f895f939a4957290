//! Layered layout engine
//!
//! This module turns a list of nodes and directed edges into one position per
//! node. Nodes are grouped into levels by a breadth-first traversal from the
//! roots of the graph, levels are stacked vertically, and the nodes of each
//! level are spread evenly on a horizontal row.
//!
//! The computation is pure: the same nodes and edges, in the same order, always
//! produce the same positions. The one exception is a node that ends up without
//! a level, which is placed at a random offset around the center using the
//! random source handed to [`Engine::calculate_with_rng`].

mod adjacency;
mod levels;
mod placement;

use std::collections::HashMap;

use indexmap::IndexSet;
use log::{debug, info, warn};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use stratum_core::{
    geometry::Point,
    graph::{GraphEdge, GraphNode, PositionedNode},
    identifier::Id,
};

use adjacency::Adjacency;

/// Edge endpoint named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Errors produced by the layout engine.
///
/// Structurally odd graphs (cycles, self-loops, dangling endpoints) are never
/// errors; only input that cannot be interpreted at all is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("edge #{index} has no {missing}")]
    InvalidEdge { index: usize, missing: Endpoint },

    #[error("layout option `{name}` must be {expected}, got {value}")]
    InvalidOption {
        name: &'static str,
        expected: &'static str,
        value: f64,
    },
}

/// Settings controlling where the layout places nodes.
///
/// All fields have defaults, so a partially specified configuration file only
/// overrides what it names.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Horizontal center of every level.
    center_x: f64,
    /// Vertical position of level 0.
    center_y: f64,
    /// Vertical distance between successive levels.
    level_spacing: f64,
    /// Minimum horizontal span of a level.
    min_level_width: f64,
    /// Horizontal span claimed by each node of a crowded level.
    node_spacing: f64,
    /// Maximum offset from the center for nodes without a level.
    jitter: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            center_x: 500.0,
            center_y: 300.0,
            level_spacing: 150.0,
            min_level_width: 800.0,
            node_spacing: 200.0,
            jitter: 100.0,
        }
    }
}

impl LayoutOptions {
    /// Set the horizontal center of the layout
    pub fn with_center_x(mut self, center_x: f64) -> Self {
        self.center_x = center_x;
        self
    }

    /// Set the vertical position of the first level
    pub fn with_center_y(mut self, center_y: f64) -> Self {
        self.center_y = center_y;
        self
    }

    /// Set the vertical distance between levels
    pub fn with_level_spacing(mut self, spacing: f64) -> Self {
        self.level_spacing = spacing;
        self
    }

    /// Set the minimum horizontal span of a level
    pub fn with_min_level_width(mut self, width: f64) -> Self {
        self.min_level_width = width;
        self
    }

    /// Set the span each node claims in a crowded level
    pub fn with_node_spacing(mut self, spacing: f64) -> Self {
        self.node_spacing = spacing;
        self
    }

    /// Set the fallback jitter radius
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn center_x(&self) -> f64 {
        self.center_x
    }

    pub fn center_y(&self) -> f64 {
        self.center_y
    }

    pub fn level_spacing(&self) -> f64 {
        self.level_spacing
    }

    pub fn min_level_width(&self) -> f64 {
        self.min_level_width
    }

    pub fn node_spacing(&self) -> f64 {
        self.node_spacing
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Checks that every option yields finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidOption`] for a non-finite value, for a
    /// `node_spacing` that is not positive, or for a negative width or jitter.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let finite = [
            ("center_x", self.center_x),
            ("center_y", self.center_y),
            ("level_spacing", self.level_spacing),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(LayoutError::InvalidOption {
                    name,
                    expected: "a finite number",
                    value,
                });
            }
        }

        // A zero span would stack every node of a row on `center_x`.
        if !self.node_spacing.is_finite() || self.node_spacing <= 0.0 {
            return Err(LayoutError::InvalidOption {
                name: "node_spacing",
                expected: "a finite positive number",
                value: self.node_spacing,
            });
        }

        let non_negative = [
            ("min_level_width", self.min_level_width),
            ("jitter", self.jitter),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidOption {
                    name,
                    expected: "a finite non-negative number",
                    value,
                });
            }
        }

        Ok(())
    }
}

/// The layered layout engine.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: LayoutOptions,
}

impl Engine {
    /// Create a new engine with the given options
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Returns the options used by this engine.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Calculate positions, drawing fallback jitter from the thread-local RNG.
    ///
    /// # Errors
    ///
    /// See [`Engine::calculate_with_rng`].
    pub fn calculate(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
    ) -> Result<Vec<PositionedNode>, LayoutError> {
        self.calculate_with_rng(nodes, edges, &mut rand::rng())
    }

    /// Calculate one position per node.
    ///
    /// The result has exactly one entry per input node, in input order.
    /// Edges whose endpoints are not among `nodes` take part in root detection
    /// but are never traversed and never produce output entries.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Graph nodes; identifiers are expected to be unique
    /// * `edges` - Directed edges; repeats and self-loops are allowed
    /// * `rng` - Random source for nodes left without a level
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidEdge`] if an edge lacks its source or
    /// target, and [`LayoutError::InvalidOption`] if the options are unusable.
    pub fn calculate_with_rng<R: Rng + ?Sized>(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        rng: &mut R,
    ) -> Result<Vec<PositionedNode>, LayoutError> {
        self.options.validate()?;
        let links = validate_edges(edges)?;

        if nodes.is_empty() {
            debug!("No nodes to lay out");
            return Ok(Vec::new());
        }

        let node_ids: IndexSet<Id> = nodes.iter().map(GraphNode::id).collect();
        let adjacency = Adjacency::from_edges(links);
        let levels = levels::assign_levels(&node_ids, &adjacency);

        info!(
            nodes_count = nodes.len(),
            edges_count = adjacency.edges_count(),
            levels_count = levels.len(),
            layering:% = levels.layering();
            "Layout levels assigned"
        );

        let positions = placement::place_levels(levels.as_slice(), &self.options);
        Ok(self.resolve_positions(nodes, &positions, rng))
    }

    /// Builds the output list, falling back to a jittered center position for
    /// any node missing from `positions`.
    fn resolve_positions<R: Rng + ?Sized>(
        &self,
        nodes: &[GraphNode],
        positions: &HashMap<Id, Point>,
        rng: &mut R,
    ) -> Vec<PositionedNode> {
        nodes
            .iter()
            .map(|node| {
                let position = match positions.get(&node.id()) {
                    Some(&position) => position,
                    None => {
                        warn!(node_id:% = node.id(); "Node has no level, using random position");
                        self.jittered_center(rng)
                    }
                };
                PositionedNode::new(node, position)
            })
            .collect()
    }

    /// Returns a point within `jitter` of the center on both axes.
    fn jittered_center<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let jitter = self.options.jitter;
        let dx = rng.random::<f64>() * 2.0 * jitter - jitter;
        let dy = rng.random::<f64>() * 2.0 * jitter - jitter;
        Point::new(self.options.center_x + dx, self.options.center_y + dy)
    }
}

/// Calculate positions for `nodes` with the given options.
///
/// Convenience wrapper around [`Engine::calculate`].
///
/// # Examples
///
/// ```
/// use stratum::layout::{LayoutOptions, compute_positions};
/// use stratum::graph::{GraphEdge, GraphNode};
///
/// let nodes = [GraphNode::new("a"), GraphNode::new("b")];
/// let edges = [GraphEdge::new("a", "b")];
///
/// let positioned = compute_positions(&nodes, &edges, &LayoutOptions::default())
///     .expect("valid graph");
///
/// assert_eq!(positioned[0].position().y(), 300.0);
/// assert_eq!(positioned[1].position().y(), 450.0);
/// ```
///
/// # Errors
///
/// See [`Engine::calculate_with_rng`].
pub fn compute_positions(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    options: &LayoutOptions,
) -> Result<Vec<PositionedNode>, LayoutError> {
    Engine::new(*options).calculate(nodes, edges)
}

/// Extracts `(source, target)` pairs, rejecting the first edge missing an endpoint.
fn validate_edges(edges: &[GraphEdge]) -> Result<Vec<(Id, Id)>, LayoutError> {
    edges
        .iter()
        .enumerate()
        .map(|(index, edge)| match (edge.source(), edge.target()) {
            (Some(source), Some(target)) => Ok((source, target)),
            (None, _) => Err(LayoutError::InvalidEdge {
                index,
                missing: Endpoint::Source,
            }),
            (_, None) => Err(LayoutError::InvalidEdge {
                index,
                missing: Endpoint::Target,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;

    use super::*;

    fn nodes(names: &[&str]) -> Vec<GraphNode> {
        names.iter().map(|name| GraphNode::new(*name)).collect()
    }

    fn edges(pairs: &[(&str, &str)]) -> Vec<GraphEdge> {
        pairs
            .iter()
            .map(|(source, target)| GraphEdge::new(*source, *target))
            .collect()
    }

    fn layout(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<PositionedNode> {
        Engine::default()
            .calculate_with_rng(nodes, edges, &mut StdRng::seed_from_u64(7))
            .expect("layout should succeed")
    }

    fn position_of(positioned: &[PositionedNode], name: &str) -> Point {
        positioned
            .iter()
            .find(|node| node.id() == name)
            .map(PositionedNode::position)
            .unwrap_or_else(|| panic!("node {name} missing from output"))
    }

    #[test]
    fn test_empty_input() {
        assert!(layout(&[], &[]).is_empty());
        assert!(layout(&[], &edges(&[("a", "b")])).is_empty());
    }

    #[test]
    fn test_no_edges_single_row() {
        let positioned = layout(&nodes(&["a", "b", "c", "d"]), &[]);

        for node in &positioned {
            assert_approx_eq!(f64, node.position().y(), 300.0);
        }
        let xs: Vec<f64> = positioned.iter().map(|node| node.position().x()).collect();
        assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
        for (left, right) in xs.iter().zip(xs.iter().rev()) {
            assert_approx_eq!(f64, 500.0 - left, right - 500.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_chain_stacks_levels() {
        let positioned = layout(
            &nodes(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("b", "c")]),
        );

        let (a, b, c) = (
            position_of(&positioned, "a"),
            position_of(&positioned, "b"),
            position_of(&positioned, "c"),
        );
        assert_approx_eq!(f64, b.y() - a.y(), 150.0);
        assert_approx_eq!(f64, c.y() - b.y(), 150.0);
        for point in [a, b, c] {
            assert_approx_eq!(f64, point.x(), 500.0);
        }
    }

    #[test]
    fn test_diamond() {
        let positioned = layout(
            &nodes(&["a", "b", "c", "d"]),
            &edges(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]),
        );

        let (a, b, c, d) = (
            position_of(&positioned, "a"),
            position_of(&positioned, "b"),
            position_of(&positioned, "c"),
            position_of(&positioned, "d"),
        );
        assert_eq!(a, Point::new(500.0, 300.0));
        assert_approx_eq!(f64, b.y(), 450.0);
        assert_approx_eq!(f64, c.y(), 450.0);
        assert_approx_eq!(f64, 500.0 - b.x(), c.x() - 500.0, epsilon = 1e-9);
        assert!(b.x() < 500.0 && c.x() > 500.0);
        assert_eq!(d, Point::new(500.0, 600.0));
    }

    #[test]
    fn test_pure_cycle_stays_on_first_level() {
        let positioned = layout(
            &nodes(&["a", "b", "c"]),
            &edges(&[("a", "b"), ("b", "c"), ("c", "a")]),
        );

        for node in &positioned {
            assert_approx_eq!(f64, node.position().y(), 300.0);
        }
    }

    #[test]
    fn test_unreachable_nodes_get_final_level() {
        let positioned = layout(
            &nodes(&["a", "b", "c", "d"]),
            &edges(&[("a", "b"), ("c", "d"), ("d", "c")]),
        );

        assert_approx_eq!(f64, position_of(&positioned, "a").y(), 300.0);
        assert_approx_eq!(f64, position_of(&positioned, "b").y(), 450.0);
        assert_approx_eq!(f64, position_of(&positioned, "c").y(), 600.0);
        assert_approx_eq!(f64, position_of(&positioned, "d").y(), 600.0);
    }

    #[test]
    fn test_isolated_node_shares_root_level() {
        let positioned = layout(&nodes(&["a", "b", "c"]), &edges(&[("a", "b")]));

        assert_approx_eq!(f64, position_of(&positioned, "a").y(), 300.0);
        assert_approx_eq!(f64, position_of(&positioned, "c").y(), 300.0);
        assert_approx_eq!(f64, position_of(&positioned, "b").y(), 450.0);
    }

    #[test]
    fn test_output_matches_input_order_and_ids() {
        let input = vec![
            GraphNode::new(3u64),
            GraphNode::new("x"),
            GraphNode::new(1u64),
        ];
        let positioned = layout(&input, &[GraphEdge::new(1u64, 3u64)]);

        assert_eq!(positioned.len(), input.len());
        for (node, out) in input.iter().zip(&positioned) {
            assert_eq!(node.id(), out.id());
            assert_eq!(out.data()["id"], json!(node.id().as_string()));
            assert!(out.connectable());
        }
        assert_eq!(positioned[0].id(), "3");
    }

    #[test]
    fn test_dangling_edges_are_ignored() {
        let positioned = layout(
            &nodes(&["a", "b"]),
            &edges(&[("a", "ghost"), ("ghost", "phantom"), ("a", "b")]),
        );

        assert_eq!(positioned.len(), 2);
        assert!(positioned.iter().all(|node| node.id() != "ghost"));
        assert_eq!(position_of(&positioned, "a"), Point::new(500.0, 300.0));
        assert_eq!(position_of(&positioned, "b"), Point::new(500.0, 450.0));
    }

    #[test]
    fn test_self_loops_and_repeated_edges() {
        let positioned = layout(
            &nodes(&["a", "b"]),
            &edges(&[("a", "b"), ("a", "b"), ("b", "b")]),
        );

        assert_eq!(position_of(&positioned, "a"), Point::new(500.0, 300.0));
        assert_eq!(position_of(&positioned, "b"), Point::new(500.0, 450.0));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let graph_nodes = nodes(&["a", "b", "c", "d", "e"]);
        let graph_edges = edges(&[("a", "c"), ("b", "c"), ("c", "d"), ("e", "a")]);

        let first = Engine::default().calculate(&graph_nodes, &graph_edges).unwrap();
        let second = Engine::default().calculate(&graph_nodes, &graph_edges).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_options() {
        let engine = Engine::new(
            LayoutOptions::default()
                .with_center_x(0.0)
                .with_center_y(0.0)
                .with_level_spacing(10.0),
        );

        let positioned = engine
            .calculate(&nodes(&["a", "b"]), &edges(&[("a", "b")]))
            .unwrap();

        assert_eq!(positioned[0].position(), Point::new(0.0, 0.0));
        assert_eq!(positioned[1].position(), Point::new(0.0, 10.0));
    }

    #[test]
    fn test_missing_endpoint_is_rejected() {
        let bad_edge: GraphEdge = serde_json::from_value(json!({"source": "a"})).unwrap();
        let result = Engine::default().calculate(
            &nodes(&["a", "b"]),
            &[GraphEdge::new("a", "b"), bad_edge],
        );

        assert_eq!(
            result,
            Err(LayoutError::InvalidEdge {
                index: 1,
                missing: Endpoint::Target,
            })
        );
    }

    #[test]
    fn test_missing_source_reported_first() {
        let result = Engine::default().calculate(&nodes(&["a"]), &[GraphEdge::default()]);

        let err = result.unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidEdge {
                index: 0,
                missing: Endpoint::Source,
            }
        );
        assert_eq!(err.to_string(), "edge #0 has no source");
    }

    #[test]
    fn test_invalid_options_rejected() {
        let engine = Engine::new(LayoutOptions::default().with_center_x(f64::NAN));
        assert!(matches!(
            engine.calculate(&nodes(&["a"]), &[]),
            Err(LayoutError::InvalidOption { name: "center_x", .. })
        ));

        let engine = Engine::new(LayoutOptions::default().with_jitter(-1.0));
        assert!(matches!(
            engine.calculate(&nodes(&["a"]), &[]),
            Err(LayoutError::InvalidOption { name: "jitter", .. })
        ));
    }

    #[test]
    fn test_zero_node_spacing_rejected() {
        let engine = Engine::new(
            LayoutOptions::default()
                .with_min_level_width(0.0)
                .with_node_spacing(0.0),
        );

        let result = engine.calculate(&nodes(&["a", "b", "c"]), &[]);

        assert!(matches!(
            result,
            Err(LayoutError::InvalidOption {
                name: "node_spacing",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_min_width_keeps_row_apart() {
        let engine = Engine::new(LayoutOptions::default().with_min_level_width(0.0));

        let positioned = engine.calculate(&nodes(&["a", "b", "c"]), &[]).unwrap();

        let xs: Vec<f64> = positioned.iter().map(|node| node.position().x()).collect();
        assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
        assert_approx_eq!(f64, xs[1], 500.0);
    }

    #[test]
    fn test_fallback_stays_within_jitter() {
        let engine = Engine::default();
        let graph_nodes = nodes(&["lost", "found"]);
        let positions = HashMap::from([(Id::new("found"), Point::new(1.0, 2.0))]);

        let positioned =
            engine.resolve_positions(&graph_nodes, &positions, &mut StdRng::seed_from_u64(1));

        let lost = positioned[0].position();
        assert!((lost.x() - 500.0).abs() <= 100.0);
        assert!((lost.y() - 300.0).abs() <= 100.0);
        assert_eq!(positioned[1].position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_fallback_is_reproducible_with_seed() {
        // Non-deterministic branch: reproducible only under a fixed seed.
        let engine = Engine::default();
        let graph_nodes = nodes(&["lost"]);
        let positions = HashMap::new();

        let first =
            engine.resolve_positions(&graph_nodes, &positions, &mut StdRng::seed_from_u64(42));
        let second =
            engine.resolve_positions(&graph_nodes, &positions, &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_jitter_fallback_is_center() {
        let engine = Engine::new(LayoutOptions::default().with_jitter(0.0));

        let positioned = engine.resolve_positions(
            &nodes(&["lost"]),
            &HashMap::new(),
            &mut StdRng::seed_from_u64(3),
        );

        assert_eq!(positioned[0].position(), Point::new(500.0, 300.0));
    }
}
