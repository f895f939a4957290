//! Geometric primitives for graph layout.
//!
//! # Coordinate System
//!
//! Stratum uses the screen coordinate convention of the rendering widget:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Successive layers of a layout therefore move downward, towards larger `y`.

use serde::{Deserialize, Serialize};

/// A 2D point in layout coordinate space.
///
/// Coordinates are `f64` so that positions match the numbers a browser-side
/// renderer computes for the same graph.
///
/// # Examples
///
/// ```
/// # use stratum_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
///
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// assert!(p.is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns true when neither coordinate is NaN or infinite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
