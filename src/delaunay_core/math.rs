use crate::{Circle, InsertionError, Point};

/// The smallest allowed coordinate value greater than zero that can be inserted into a
/// triangulation. This value is equal to 2<sup>-142</sup>.
///
/// The *absolute value* of any inserted coordinate must be either zero or greater
/// than or equal to this value.
/// This is a requirement for preventing floating point underflow when calculating exact
/// orientation predicates.
///
/// Note that "underflow" refers to underflow of the `f64` _exponent_: values very close to
/// zero (but not zero itself) can trigger this situation.
///
/// *See also [validate_coordinate], [validate_point], [MAX_ALLOWED_VALUE],
/// [crate::Triangulation::insert], [mitigate_underflow]*

// These limits are the exponent range for which Shewchuk's adaptive predicates
// ("Adaptive Precision Floating-Point Arithmetic and Fast Robust Geometric Predicates")
// neither overflow nor underflow.
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest allowed coordinate value that can be inserted into a triangulation.
/// This value is equal to 2<sup>201</sup>.
///
/// *See also [validate_coordinate], [validate_point], [MIN_ALLOWED_VALUE]*
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Checks if a coordinate value is suitable for insertion into a triangulation.
///
/// Will return an error if and only if
///  - The absolute value of the coordinate is too small (See [MIN_ALLOWED_VALUE])
///  - The absolute value of the coordinate is too large (See [MAX_ALLOWED_VALUE])
///  - The coordinate is NaN (not a number)
///
/// Passing in any infinite value will result in `Err(InsertionError::TooLarge)`.
///
/// *See also [mitigate_underflow]*
pub fn validate_coordinate(value: f64) -> Result<(), InsertionError> {
    if value.is_nan() {
        Err(InsertionError::NAN)
    } else if value.abs() < MIN_ALLOWED_VALUE && value != 0.0 {
        Err(InsertionError::TooSmall)
    } else if value.abs() > MAX_ALLOWED_VALUE {
        Err(InsertionError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if a point is suitable for insertion into a triangulation.
///
/// Only `x` and `y` are validated, `z` is payload and may hold any value.
pub fn validate_point(point: Point) -> Result<(), InsertionError> {
    validate_coordinate(point.x)?;
    validate_coordinate(point.y)?;
    Ok(())
}

/// Prevents underflow issues of a point by setting any planar coordinate that is too small
/// to zero.
///
/// A point returned by this function will never cause [InsertionError::TooSmall] when being
/// inserted. The value is _always_ rounded towards zero, even if rounding to
/// ±[MIN_ALLOWED_VALUE] would result in a smaller rounding error.
///
/// # Example
/// ```
/// use surface_delaunay::{DelaunayTriangulation, InsertionError, Point, Triangulation};
///
/// let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
///
/// let invalid = Point::new(1.0e-44, 42.0, 1.0);
/// assert_eq!(triangulation.insert(invalid), Err(InsertionError::TooSmall));
///
/// let valid = surface_delaunay::mitigate_underflow(invalid);
/// assert!(triangulation.insert(valid).is_ok());
/// assert_eq!(valid, Point::new(0.0, 42.0, 1.0));
/// ```
pub fn mitigate_underflow(point: Point) -> Point {
    Point::new(
        mitigate_underflow_for_coordinate(point.x),
        mitigate_underflow_for_coordinate(point.y),
        point.z,
    )
}

fn mitigate_underflow_for_coordinate(coordinate: f64) -> f64 {
    if coordinate != 0.0 && coordinate.abs() < MIN_ALLOWED_VALUE {
        0.0
    } else {
        coordinate
    }
}

/// Exact orientation of `query` relative to the directed line `from -> to`.
///
/// Positive if `query` lies to the left, negative if it lies to the right and zero if the
/// three points are collinear.
pub(crate) fn orientation(from: Point, to: Point, query: Point) -> f64 {
    robust::orient2d(
        from.to_robust_coord(),
        to.to_robust_coord(),
        query.to_robust_coord(),
    )
}

pub(crate) fn is_strictly_ccw(positions: [Point; 3]) -> bool {
    let [a, b, c] = positions;
    orientation(a, b, c) > 0.0
}

/// Circumcircle through three points, solved as the intersection of the perpendicular
/// bisectors of `a - b` and `b - c`.
///
/// Returns [Circle::degenerate] centered at `a` if the determinant vanishes.
pub(crate) fn circumcircle(positions: [Point; 3]) -> Circle {
    let [a, b, c] = positions;
    let u = ((a.x - b.x) * (a.x + b.x) + (a.y - b.y) * (a.y + b.y)) / 2.0;
    let v = ((b.x - c.x) * (b.x + c.x) + (b.y - c.y) * (b.y + c.y)) / 2.0;
    let den = (a.x - b.x) * (b.y - c.y) - (b.x - c.x) * (a.y - b.y);

    if den == 0.0 {
        return Circle::degenerate(a);
    }

    let center = Point::flat(
        (u * (b.y - c.y) - v * (a.y - b.y)) / den,
        (v * (a.x - b.x) - u * (b.x - c.x)) / den,
    );
    Circle::new(center, center.distance2(a))
}

/// Evaluates the plane through three points at the planar position of `query`.
///
/// `query` does not need to lie within the triangle. Returns `None` if the three points are
/// collinear and therefore do not span a plane.
pub(crate) fn plane_z(positions: [Point; 3], query: Point) -> Option<f64> {
    let [a, b, c] = positions;
    let (bx, by) = (b.x - a.x, b.y - a.y);
    let (cx, cy) = (c.x - a.x, c.y - a.y);
    let (qx, qy) = (query.x - a.x, query.y - a.y);

    let den = bx * cy - cx * by;
    if den == 0.0 {
        return None;
    }

    // Barycentric weights of b and c
    let lambda_b = (qx * cy - cx * qy) / den;
    let lambda_c = (bx * qy - qx * by) / den;
    Some(a.z + lambda_b * (b.z - a.z) + lambda_c * (c.z - a.z))
}

/// Linear interpolation of `z` along the segment `from - to` at the projection of `query`.
pub(crate) fn segment_z(from: Point, to: Point, query: Point) -> f64 {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length2 = dx * dx + dy * dy;
    if length2 == 0.0 {
        return from.z;
    }
    let t = ((query.x - from.x) * dx + (query.y - from.y) * dy) / length2;
    from.z + t * (to.z - from.z)
}

pub(crate) fn triangle_area(positions: [Point; 3]) -> f64 {
    let [a, b, c] = positions;
    ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs() * 0.5
}
