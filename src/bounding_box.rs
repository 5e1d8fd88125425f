use crate::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis aligned bounding box in the plane.
///
/// The box ignores `z`: both corners are stored with a `z` value of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct BoundingBox {
    lower: Point,
    upper: Point,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Creates a bounding box that contains nothing.
    ///
    /// `lower` and `upper` are set to positive and negative infinity. Adding a point
    /// turns it into a box around that point.
    pub fn empty() -> Self {
        BoundingBox {
            lower: Point::flat(f64::INFINITY, f64::INFINITY),
            upper: Point::flat(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Creates a bounding box with `lower == upper == point`.
    pub fn from_point(point: Point) -> Self {
        let point = point.with_z(0.0);
        BoundingBox {
            lower: point,
            upper: point,
        }
    }

    /// Creates the bounding box spanned by two opposite corners, given in any order.
    pub fn from_corners(corner1: Point, corner2: Point) -> Self {
        BoundingBox {
            lower: Point::flat(corner1.x.min(corner2.x), corner1.y.min(corner2.y)),
            upper: Point::flat(corner1.x.max(corner2.x), corner1.y.max(corner2.y)),
        }
    }

    /// Creates the smallest bounding box containing all given points.
    ///
    /// Returns an [empty](BoundingBox::empty) box if the iterator yields nothing.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut result = Self::empty();
        for point in points {
            result.add_point(point);
        }
        result
    }

    /// The corner with the smaller coordinates.
    pub fn lower(&self) -> Point {
        self.lower
    }

    /// The corner with the larger coordinates.
    pub fn upper(&self) -> Point {
        self.upper
    }

    /// Returns `true` if no point has been added yet.
    pub fn is_empty(&self) -> bool {
        self.lower.x > self.upper.x || self.lower.y > self.upper.y
    }

    /// Enlarges this box just enough to contain `point`.
    pub fn add_point(&mut self, point: Point) {
        self.lower = Point::flat(self.lower.x.min(point.x), self.lower.y.min(point.y));
        self.upper = Point::flat(self.upper.x.max(point.x), self.upper.y.max(point.y));
    }

    /// Enlarges this box just enough to contain another box.
    pub fn add_box(&mut self, other: &BoundingBox) {
        if !other.is_empty() {
            self.add_point(other.lower);
            self.add_point(other.upper);
        }
    }

    /// Checks if a point lies within this box. Points on the border are contained.
    pub fn contains_point(&self, point: Point) -> bool {
        self.lower.x <= point.x
            && point.x <= self.upper.x
            && self.lower.y <= point.y
            && point.y <= self.upper.y
    }

    /// Checks if two boxes share at least one point. Touching borders count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.lower.x <= other.upper.x
            && other.lower.x <= self.upper.x
            && self.lower.y <= other.upper.y
            && other.lower.y <= self.upper.y
    }

    /// Extent along the x axis.
    pub fn width(&self) -> f64 {
        self.upper.x - self.lower.x
    }

    /// Extent along the y axis.
    pub fn height(&self) -> f64 {
        self.upper.y - self.lower.y
    }

    /// Returns `width * height`.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the center with a `z` of zero.
    pub fn center(&self) -> Point {
        Point::flat(
            self.lower.x + self.width() * 0.5,
            self.lower.y + self.height() * 0.5,
        )
    }
}
