use crate::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A circle given by its center and its *squared* radius.
///
/// Used as the cached circumcircle of a bounded face. A radius of `f64::INFINITY` marks
/// the circumcircle of three exactly collinear points. Such a circle contains every
/// finite point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Circle {
    center: Point,
    radius2: f64,
}

impl Circle {
    /// Creates a circle from its center and squared radius.
    pub fn new(center: Point, radius2: f64) -> Self {
        Circle { center, radius2 }
    }

    /// Creates the sentinel circle used for degenerate (collinear) corner triples.
    pub fn degenerate(center: Point) -> Self {
        Circle {
            center,
            radius2: f64::INFINITY,
        }
    }

    /// The circle's center. Its `z` value carries no meaning.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The squared radius.
    pub fn radius2(&self) -> f64 {
        self.radius2
    }

    /// The radius. Infinite for the degenerate sentinel circle.
    pub fn radius(&self) -> f64 {
        self.radius2.sqrt()
    }

    /// Returns `true` if this is the infinite sentinel circle.
    pub fn is_degenerate(&self) -> bool {
        self.radius2 == f64::INFINITY
    }

    /// Returns `true` if `point` lies strictly inside this circle.
    ///
    /// Points exactly on the circle are *not* contained. Co-circular configurations are
    /// thus always considered legal, which keeps edge legalization from flipping back and
    /// forth on symmetric inputs like regular grids.
    pub fn contains(&self, point: Point) -> bool {
        self.radius2 > self.center.distance2(point)
    }
}
