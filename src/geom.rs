#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates. `y` grows downward, as on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Shift both coordinates by the same amount.
    #[must_use]
    pub fn offset(self, by: f64) -> Point {
        Point { x: self.x + by, y: self.y + by }
    }
}

/// Center of a token whose top-left corner is at `corner` and whose rendered
/// edge length is `token_size`.
#[must_use]
pub fn token_center(corner: Point, token_size: f64) -> Point {
    corner.offset(token_size / 2.0)
}
