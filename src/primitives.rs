use crate::delaunay_core::math;
use crate::{BoundingBox, Circle, InterpolationError, LineSide, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A standalone triangle with counterclockwise corner order and a cached circumcircle.
///
/// This is the value type behind every bounded face of a triangulation, see
/// [crate::handles::FaceHandle::triangle]. It can also be constructed directly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangle {
    corners: [Point; 3],
    circumcircle: Circle,
}

impl Triangle {
    /// Creates a new triangle.
    ///
    /// The stored corner order is always counterclockwise: if `c` lies right of `a -> b`,
    /// `b` and `c` are swapped. Collinear corners beyond the segment `a - b` keep their
    /// order, while a `c` lying on the segment itself is swapped.
    ///
    /// # Example
    /// ```
    /// use surface_delaunay::{Point, Triangle};
    ///
    /// let a = Point::flat(0.0, 0.0);
    /// let b = Point::flat(1.0, 0.0);
    /// let c = Point::flat(0.0, 1.0);
    /// assert_eq!(Triangle::new(a, c, b).corners(), [a, b, c]);
    /// ```
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        let corners = match c.point_line_test(a, b) {
            LineSide::Left | LineSide::InFrontOfA | LineSide::BehindB => [a, b, c],
            LineSide::Right | LineSide::OnSegment => {
                log::debug!("Correcting clockwise triangle ({}, {}, {})", a, b, c);
                [a, c, b]
            }
        };
        Self::from_ccw_corners(corners)
    }

    pub(crate) fn from_ccw_corners(corners: [Point; 3]) -> Self {
        Triangle {
            corners,
            circumcircle: math::circumcircle(corners),
        }
    }

    pub(crate) fn from_parts(corners: [Point; 3], circumcircle: Circle) -> Self {
        Triangle {
            corners,
            circumcircle,
        }
    }

    /// The first corner.
    pub fn a(&self) -> Point {
        self.corners[0]
    }

    /// The second corner in counterclockwise order.
    pub fn b(&self) -> Point {
        self.corners[1]
    }

    /// The third corner in counterclockwise order.
    pub fn c(&self) -> Point {
        self.corners[2]
    }

    /// Returns all three corners in counterclockwise order.
    pub fn corners(&self) -> [Point; 3] {
        self.corners
    }

    /// Returns the cached circumcircle.
    ///
    /// The circle is [degenerate](Circle::is_degenerate) if all corners are collinear.
    pub fn circumcircle(&self) -> Circle {
        self.circumcircle
    }

    /// Returns `true` if `point` is equal to one of the corners.
    pub fn is_corner(&self, point: Point) -> bool {
        self.corners.contains(&point)
    }

    /// Returns `true` if `point` lies strictly inside the circumcircle.
    ///
    /// The triangle's own corners are never contained.
    pub fn circumcircle_contains(&self, point: Point) -> bool {
        !self.is_corner(point) && self.circumcircle.contains(point)
    }

    /// Returns `true` if `point` lies inside the triangle or on its boundary.
    ///
    /// Corners are contained. Returns `false` for points with non-finite coordinates.
    pub fn contains(&self, point: Point) -> bool {
        if !point.is_finite() {
            return false;
        }
        if self.is_corner(point) {
            return true;
        }
        let sides = self.edge_sides(point);
        Self::is_strictly_inside(sides) || sides.contains(&LineSide::OnSegment)
    }

    /// Returns `true` if `point` lies strictly inside the triangle.
    ///
    /// Points on an edge and the corners themselves are considered outside. Returns `false`
    /// for points with non-finite coordinates.
    pub fn contains_boundary_is_outside(&self, point: Point) -> bool {
        if !point.is_finite() || self.is_corner(point) {
            return false;
        }
        Self::is_strictly_inside(self.edge_sides(point))
    }

    fn edge_sides(&self, point: Point) -> [LineSide; 3] {
        let [a, b, c] = self.corners;
        [
            point.point_line_test(a, b),
            point.point_line_test(b, c),
            point.point_line_test(c, a),
        ]
    }

    fn is_strictly_inside(sides: [LineSide; 3]) -> bool {
        sides.iter().all(|side| side.is_left()) || sides.iter().all(|side| side.is_right())
    }

    /// Evaluates the plane through the three corners at the planar position of `query`.
    ///
    /// The query does not need to lie within the triangle. A query equal to a corner
    /// returns that corner's `z` exactly.
    ///
    /// # Example
    /// ```
    /// use surface_delaunay::{Point, Triangle};
    ///
    /// let triangle = Triangle::new(
    ///     Point::new(0.0, 0.0, 0.0),
    ///     Point::new(1.0, 0.0, 0.0),
    ///     Point::new(0.0, 1.0, 5.0),
    /// );
    /// assert_eq!(triangle.z_value(Point::flat(0.0, 1.0)), Ok(5.0));
    /// assert_eq!(triangle.z_value(Point::flat(0.0, 0.5)), Ok(2.5));
    /// ```
    pub fn z_value(&self, query: Point) -> Result<f64, InterpolationError> {
        if !query.is_finite() {
            return Err(InterpolationError::InvalidQuery);
        }
        if let Some(corner) = self.corners.iter().find(|corner| **corner == query) {
            return Ok(corner.z);
        }
        math::plane_z(self.corners, query).ok_or(InterpolationError::Degenerate)
    }

    /// Returns `query` with its `z` replaced by the interpolated plane value.
    pub fn lift(&self, query: Point) -> Result<Point, InterpolationError> {
        self.z_value(query).map(|z| query.with_z(z))
    }

    /// Returns the planar area, ignoring `z`.
    pub fn area(&self) -> f64 {
        math::triangle_area(self.corners)
    }

    /// Returns the smallest axis aligned box containing all corners.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.corners)
    }
}

/// The unbounded region strictly left of the directed hull segment `a -> b`.
///
/// Half-planes have no circumcircle and no plane equation. They never contain any point in
/// the sense of [Triangle::contains], and their circumcircle never contains anything.
///
/// See [FaceHandle::half_plane](crate::handles::FaceHandle::half_plane).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct HalfPlane {
    a: Point,
    b: Point,
}

impl HalfPlane {
    /// Creates the half-plane left of `a -> b`.
    pub fn new(a: Point, b: Point) -> Self {
        HalfPlane { a, b }
    }

    /// Start of the hull segment.
    pub fn a(&self) -> Point {
        self.a
    }

    /// End of the hull segment.
    pub fn b(&self) -> Point {
        self.b
    }

    /// Always `false`.
    pub fn contains(&self, _point: Point) -> bool {
        false
    }

    /// Always `false`.
    pub fn circumcircle_contains(&self, _point: Point) -> bool {
        false
    }

    /// Returns `true` if `point` lies in the open region represented by this half-plane,
    /// i.e. if the hull segment `a - b` is visible from `point`.
    pub fn is_visible_from(&self, point: Point) -> bool {
        point.point_line_test(self.a, self.b).is_left()
    }
}
