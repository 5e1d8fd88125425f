use crate::delaunay_core::math;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a point relative to a directed line `a -> b`.
///
/// Unlike a plain orientation sign, collinear points are further split into points lying
/// on the segment itself and points lying on the line beyond either end of it.
///
/// *See also [Point::point_line_test]*
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSide {
    /// The point lies strictly left of the directed line.
    Left,
    /// The point lies strictly right of the directed line.
    Right,
    /// The point is collinear and lies between `a` and `b`. Both end points are included.
    OnSegment,
    /// The point is collinear and lies beyond `a`, on the side facing away from `b`.
    InFrontOfA,
    /// The point is collinear and lies beyond `b`, on the side facing away from `a`.
    BehindB,
}

impl LineSide {
    /// Returns `true` for [LineSide::Left].
    pub fn is_left(self) -> bool {
        self == LineSide::Left
    }

    /// Returns `true` for [LineSide::Right].
    pub fn is_right(self) -> bool {
        self == LineSide::Right
    }

    /// Returns `true` if the point lies anywhere on the infinite line through `a` and `b`.
    pub fn is_on_line(self) -> bool {
        !self.is_left() && !self.is_right()
    }

    /// Returns `true` if the point is collinear but not part of the closed segment `a - b`.
    pub fn is_beyond_segment(self) -> bool {
        matches!(self, LineSide::InFrontOfA | LineSide::BehindB)
    }
}

/// A point in the plane carrying an additional `z` payload.
///
/// Only `x` and `y` take part in any geometric predicate. `z` is carried along and used
/// exclusively for interpolation, see [crate::Triangle::z_value].
///
/// Equality compares `x` and `y` exactly, without any tolerance. Inputs that should be
/// considered equal within some epsilon must be snapped before insertion.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point {
    /// The point's x coordinate
    pub x: f64,
    /// The point's y coordinate
    pub y: f64,
    /// The payload value used for interpolation
    pub z: f64,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    /// Creates a new point with a `z` value of zero.
    #[inline]
    pub const fn flat(x: f64, y: f64) -> Self {
        Point { x, y, z: 0.0 }
    }

    /// Returns a copy of this point with a different `z` value.
    pub fn with_z(self, z: f64) -> Self {
        Point { z, ..self }
    }

    /// Returns `true` if both planar coordinates are finite.
    ///
    /// Queries with non-finite coordinates are treated like absent points: containment tests
    /// return `false` and interpolation fails.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the squared planar distance to another point.
    pub fn distance2(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns the planar distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        self.distance2(other).sqrt()
    }

    /// Classifies this point relative to the directed line `line_a -> line_b`.
    ///
    /// The left / right decision uses an exact orientation predicate. Collinear points are
    /// classified by their position along the line.
    ///
    /// If `line_a` and `line_b` coincide there is no direction to speak of: the point
    /// is reported as [LineSide::OnSegment] if it is equal to `line_a` and as
    /// [LineSide::InFrontOfA] otherwise.
    ///
    /// # Example
    /// ```
    /// use surface_delaunay::{LineSide, Point};
    ///
    /// let from = Point::flat(0.0, 0.0);
    /// let to = Point::flat(2.0, 0.0);
    /// assert_eq!(Point::flat(1.0, 1.0).point_line_test(from, to), LineSide::Left);
    /// assert_eq!(Point::flat(1.0, -1.0).point_line_test(from, to), LineSide::Right);
    /// assert_eq!(Point::flat(1.0, 0.0).point_line_test(from, to), LineSide::OnSegment);
    /// assert_eq!(Point::flat(-1.0, 0.0).point_line_test(from, to), LineSide::InFrontOfA);
    /// assert_eq!(Point::flat(3.0, 0.0).point_line_test(from, to), LineSide::BehindB);
    /// ```
    pub fn point_line_test(&self, line_a: Point, line_b: Point) -> LineSide {
        if line_a == line_b {
            return if *self == line_a {
                LineSide::OnSegment
            } else {
                LineSide::InFrontOfA
            };
        }

        let orientation = math::orientation(line_a, line_b, *self);
        if orientation > 0.0 {
            return LineSide::Left;
        }
        if orientation < 0.0 {
            return LineSide::Right;
        }

        // Collinear: compare along the dominant axis of the line
        let (p, a, b) = if line_a.x != line_b.x {
            (self.x, line_a.x, line_b.x)
        } else {
            (self.y, line_a.y, line_b.y)
        };

        let (before_a, past_b) = if a < b {
            (p < a, p > b)
        } else {
            (p > a, p < b)
        };

        if before_a {
            LineSide::InFrontOfA
        } else if past_b {
            LineSide::BehindB
        } else {
            LineSide::OnSegment
        }
    }

    pub(crate) fn to_robust_coord(self) -> robust::Coord<f64> {
        robust::Coord {
            x: self.x,
            y: self.y,
        }
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Point::new(x, y, z)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::flat(x, y)
    }
}

impl From<Point> for [f64; 3] {
    fn from(point: Point) -> Self {
        [point.x, point.y, point.z]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
