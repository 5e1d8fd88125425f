//! # surface_delaunay
//!
//! An incremental two dimensional Delaunay triangulation of points carrying a `z` value,
//! intended for building and querying surface meshes over scattered samples.
//!
//! # Features
//!  * Incremental insertion with point location by walking from a hint face
//!  * The area outside of the convex hull is covered by *half-plane* faces, so every
//!    position in the plane belongs to exactly one face
//!  * Degenerate inputs are supported: duplicate points are ignored and any number of
//!    collinear points is triangulated as a line
//!  * Robust orientation tests via the `robust` crate
//!  * Planar interpolation of `z` values, see [Triangulation::interpolate]
//!  * Region queries over bounded faces, see [Triangulation::bounded_faces_in_rectangle]
//!  * Serde support with the `serde` feature.
//!
//! # Example
//! ```
//! use surface_delaunay::{DelaunayTriangulation, InsertionError, Point, Triangulation};
//!
//! fn main() -> Result<(), InsertionError> {
//!     let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
//!     triangulation.insert(Point::new(0.0, 0.0, 1.0))?;
//!     triangulation.insert(Point::new(4.0, 0.0, 1.0))?;
//!     triangulation.insert(Point::new(0.0, 4.0, 5.0))?;
//!
//!     assert_eq!(triangulation.interpolate(0.0, 2.0), Some(3.0));
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(missing_docs)]

mod bounding_box;
mod circle;
mod delaunay_core;
mod delaunay_triangulation;
mod error;
mod point;
mod primitives;
mod triangulation;

#[cfg(test)]
mod test_utilities;

pub use crate::bounding_box::BoundingBox;
pub use crate::circle::Circle;
pub use crate::delaunay_core::math::{
    mitigate_underflow, validate_coordinate, validate_point, MAX_ALLOWED_VALUE,
    MIN_ALLOWED_VALUE,
};
pub use crate::delaunay_triangulation::DelaunayTriangulation;
pub use crate::error::{InsertionError, InterpolationError};
pub use crate::point::{LineSide, Point};
pub use crate::primitives::{HalfPlane, Triangle};

pub use delaunay_core::{HintGenerator, LastUsedFaceHintGenerator, PositionInTriangulation};
pub use triangulation::Triangulation;

pub use delaunay_core::handles;
pub use delaunay_core::iterators;

#[doc(hidden)]
pub use delaunay_core::Mesh;
