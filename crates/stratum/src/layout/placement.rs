//! Coordinate assignment for computed levels.
//!
//! Each level occupies one horizontal row. Rows are stacked downward from
//! `center_y` by `level_spacing`, and the nodes of a row are spread evenly over
//! a span centered on `center_x`, keeping a margin of one slot on both ends.

use std::collections::HashMap;

use stratum_core::{geometry::Point, identifier::Id};

use super::LayoutOptions;

/// Distribute `count` nodes evenly across a row centered on `center_x`.
///
/// The row spans `max(min_level_width, count * node_spacing)`. The span is cut
/// into `count + 1` equal slots and a node sits on every inner slot boundary,
/// so no node lands on either end of the span.
///
/// # Arguments
/// * `count` - Number of nodes in the row
/// * `options` - Layout options providing the center and width settings
///
/// # Returns
/// The x coordinates of the nodes, strictly increasing
pub(super) fn distribute_horizontally(count: usize, options: &LayoutOptions) -> Vec<f64> {
    let span = options
        .min_level_width()
        .max(count as f64 * options.node_spacing());
    let start_x = options.center_x() - span / 2.0;
    let spacing = span / (count as f64 + 1.0);

    (1..=count)
        .map(|slot| start_x + slot as f64 * spacing)
        .collect()
}

/// Returns the y coordinate of the row holding level `level_index`.
pub(super) fn level_y(level_index: usize, options: &LayoutOptions) -> f64 {
    options.center_y() + level_index as f64 * options.level_spacing()
}

/// Assigns a position to every node listed in `levels`.
///
/// If an identifier appears more than once, the last occurrence wins.
pub(super) fn place_levels(levels: &[Vec<Id>], options: &LayoutOptions) -> HashMap<Id, Point> {
    let mut positions = HashMap::with_capacity(levels.iter().map(Vec::len).sum());

    for (level_index, level) in levels.iter().enumerate() {
        let y = level_y(level_index, options);
        let xs = distribute_horizontally(level.len(), options);

        for (&id, x) in level.iter().zip(xs) {
            positions.insert(id, Point::new(x, y));
        }
    }

    positions
}
