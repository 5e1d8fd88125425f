use std::collections::VecDeque;
use std::iter::FromIterator;

use crate::delaunay_core::iterators::*;
use crate::delaunay_core::{math, Mesh, TriangulationExt};
use crate::handles::*;
use crate::{BoundingBox, HintGenerator, InsertionError, Point, PositionInTriangulation};

/// Defines common operations on triangulations.
///
/// Implemented by [DelaunayTriangulation](crate::DelaunayTriangulation). Import this trait
/// to insert points, locate positions or interpolate z values.
pub trait Triangulation: Default + FromIterator<Point> {
    /// The hint generator used by the triangulation. See [HintGenerator] for more information.
    type HintGenerator: HintGenerator;

    #[doc(hidden)]
    fn s(&self) -> &Mesh;

    #[doc(hidden)]
    fn s_mut(&mut self) -> &mut Mesh;

    #[doc(hidden)]
    fn hint_generator(&self) -> &Self::HintGenerator;

    #[doc(hidden)]
    fn hint_generator_mut(&mut self) -> &mut Self::HintGenerator;

    /// Creates a new, empty triangulation.
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), surface_delaunay::InsertionError> {
    /// use surface_delaunay::{DelaunayTriangulation, Point, Triangulation};
    ///
    /// let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
    /// // An empty triangulation has no vertices and no faces
    /// assert_eq!(triangulation.num_vertices(), 0);
    /// assert_eq!(triangulation.num_all_faces(), 0);
    /// triangulation.insert(Point::new(0.0, 1.0, 2.0))?;
    /// assert_eq!(triangulation.num_all_faces(), 0);
    /// triangulation.insert(Point::new(1.0, 1.0, 3.0))?;
    /// // Two vertices are enclosed by two half-planes
    /// assert_eq!(triangulation.num_all_faces(), 2);
    /// assert_eq!(triangulation.num_inner_faces(), 0);
    /// triangulation.insert(Point::new(1.0, 0.0, 4.0))?;
    /// // The third point creates the first bounded face
    /// assert_eq!(triangulation.num_inner_faces(), 1);
    /// assert_eq!(triangulation.convex_hull_size(), 3);
    /// # Ok(()) }
    /// ```
    fn new() -> Self {
        Self::default()
    }

    /// Creates a new triangulation with pre-allocated space for the given number of vertices.
    fn with_capacity(num_vertices: usize) -> Self {
        let mut result = Self::new();
        result.s_mut().reserve_capacity(num_vertices);
        result
    }

    /// Creates a triangulation from a set of points.
    ///
    /// All points are validated before any of them is inserted. Duplicates are ignored.
    fn bulk_load(points: Vec<Point>) -> Result<Self, InsertionError> {
        for point in &points {
            math::validate_point(*point)?;
        }

        let mut result = Self::with_capacity(points.len());
        for point in points {
            result.insert(point)?;
        }
        Ok(result)
    }

    /// Inserts a new point into the triangulation.
    ///
    /// Returns the handle of the new vertex. If a vertex with the same `x` and `y` exists
    /// already, the triangulation is left unchanged and the existing handle is returned.
    ///
    /// Fails if a coordinate is NaN, infinite or out of range, see [crate::validate_point].
    fn insert(&mut self, point: Point) -> Result<FixedVertexHandle, InsertionError> {
        self.insert_with_hint_option(point, None)
    }

    /// Inserts a new point, starting point location at `hint`.
    ///
    /// The hint should be a face close to the new point. Invalid hints are ignored.
    fn insert_with_hint(
        &mut self,
        point: Point,
        hint: FixedFaceHandle<PossiblyOuterTag>,
    ) -> Result<FixedVertexHandle, InsertionError> {
        self.insert_with_hint_option(point, Some(hint))
    }

    /// Returns information about the location of a point in a triangulation.
    fn locate(&self, x: f64, y: f64) -> PositionInTriangulation {
        self.locate_with_hint_option_core(Point::flat(x, y), None)
    }

    /// Returns information about the location of a point in a triangulation.
    ///
    /// The walk through the mesh starts at `hint`, which should be a face close to the point.
    fn locate_with_hint(
        &self,
        x: f64,
        y: f64,
        hint: FixedFaceHandle<PossiblyOuterTag>,
    ) -> PositionInTriangulation {
        self.locate_with_hint_option_core(Point::flat(x, y), Some(hint))
    }

    /// Locates a vertex at a given position.
    ///
    /// Returns `None` if the point could not be found.
    fn locate_vertex(&self, x: f64, y: f64) -> Option<VertexHandle<'_>> {
        match self.locate(x, y) {
            PositionInTriangulation::OnVertex(vertex) => Some(self.vertex(vertex)),
            _ => None,
        }
    }

    /// Returns the bounded face containing a position.
    ///
    /// Points on an edge or a vertex belong to exactly one of the adjacent faces, so that
    /// every position inside the convex hull maps to a single face. Returns `None` outside of
    /// the convex hull.
    fn find_face(&self, x: f64, y: f64) -> Option<FaceHandle<'_, InnerTag>> {
        match self.locate(x, y) {
            PositionInTriangulation::OnFace(face) => Some(self.face(face)),
            PositionInTriangulation::OnEdge(face, _) => self.face(face).as_inner(),
            PositionInTriangulation::OnVertex(vertex) => self.vertex(vertex).inner_faces().next(),
            PositionInTriangulation::OutsideOfConvexHull(_)
            | PositionInTriangulation::NoTriangulation => None,
        }
    }

    /// Interpolates the z value at a position.
    ///
    /// Returns the exact z value of a vertex at that position or the z value of the plane
    /// through the face containing the position. While all vertices lie on a line, positions
    /// on that line are interpolated linearly between the two closest vertices.
    ///
    /// Returns `None` outside of the convex hull.
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), surface_delaunay::InsertionError> {
    /// use surface_delaunay::{DelaunayTriangulation, Point, Triangulation};
    ///
    /// let triangulation: DelaunayTriangulation = DelaunayTriangulation::bulk_load(vec![
    ///     Point::new(0.0, 0.0, 0.0),
    ///     Point::new(1.0, 0.0, 0.0),
    ///     Point::new(0.0, 1.0, 5.0),
    /// ])?;
    ///
    /// assert_eq!(triangulation.interpolate(0.0, 1.0), Some(5.0));
    /// assert_eq!(triangulation.interpolate(0.0, 0.5), Some(2.5));
    /// assert_eq!(triangulation.interpolate(2.0, 2.0), None);
    /// # Ok(()) }
    /// ```
    fn interpolate(&self, x: f64, y: f64) -> Option<f64> {
        let query = Point::flat(x, y);
        match self.locate(x, y) {
            PositionInTriangulation::OnVertex(vertex) => Some(self.vertex(vertex).z()),
            PositionInTriangulation::OnFace(face) => self.face(face).z_value(query).ok(),
            PositionInTriangulation::OnEdge(face, _) => {
                let face = self.face(face);
                match face.as_inner() {
                    Some(inner) => inner.z_value(query).ok(),
                    None => face
                        .half_plane_positions()
                        .map(|[from, to]| math::segment_z(from, to, query)),
                }
            }
            PositionInTriangulation::OutsideOfConvexHull(_)
            | PositionInTriangulation::NoTriangulation => None,
        }
    }

    /// Converts a fixed vertex handle to a reference vertex handle.
    ///
    /// *See also the [handles](crate::handles) module for more information.*
    fn vertex(&self, handle: FixedVertexHandle) -> VertexHandle<'_> {
        self.s().vertex(handle)
    }

    /// Converts a fixed face handle to a reference face handle.
    ///
    /// *See also the [handles](crate::handles) module for more information.*
    fn face<InnerOuter: InnerOuterMarker>(
        &self,
        handle: FixedFaceHandle<InnerOuter>,
    ) -> FaceHandle<'_, InnerOuter> {
        self.s().face(handle)
    }

    /// Returns the number vertices in this triangulation.
    fn num_vertices(&self) -> usize {
        self.s().num_vertices()
    }

    /// Returns the number of all faces, including half-planes.
    fn num_all_faces(&self) -> usize {
        self.s().num_faces()
    }

    /// Returns the number of bounded faces in this triangulation.
    fn num_inner_faces(&self) -> usize {
        self.s().num_bounded_faces()
    }

    /// Returns the number of edges of the convex hull.
    ///
    /// This is the number of half-planes. While all vertices lie on a line, both sides of
    /// every segment are counted.
    ///
    /// # Complexity
    /// This method does not need to iterate through the convex hull and has a complexity of O(1)
    fn convex_hull_size(&self) -> usize {
        self.s().num_half_planes()
    }

    /// An iterator visiting all vertices.
    ///
    /// The iterator type is [VertexHandle].
    fn vertices(&self) -> VertexIterator<'_> {
        VertexIterator::new(self.s())
    }

    /// An iterator visiting all vertices.
    ///
    /// The iterator type is [FixedVertexHandle].
    fn fixed_vertices(&self) -> FixedVertexIterator {
        FixedVertexIterator::new(self.num_vertices())
    }

    /// An iterator visiting all faces, including half-planes.
    ///
    /// The iterator type is [FaceHandle<PossiblyOuterTag>](FaceHandle).
    /// See also [inner_faces()](Self::inner_faces()).
    fn all_faces(&self) -> FaceIterator<'_> {
        FaceIterator::new(self.s())
    }

    /// An iterator visiting all faces, including half-planes.
    ///
    /// The iterator type is [FixedFaceHandle<PossiblyOuterTag>](FixedFaceHandle).
    fn fixed_all_faces(&self) -> FixedFaceIterator {
        FixedFaceIterator::new(self.num_all_faces())
    }

    /// An iterator visiting all bounded faces.
    ///
    /// The iterator type is [FaceHandle<InnerTag>](FaceHandle).
    fn inner_faces(&self) -> InnerFaceIterator<'_> {
        InnerFaceIterator::new(self.s())
    }

    /// An iterator visiting all bounded faces.
    ///
    /// The iterator type is [FixedFaceHandle<InnerTag>](FixedFaceHandle).
    fn fixed_inner_faces(&self) -> FixedInnerFaceIterator<'_> {
        FixedInnerFaceIterator::new(self.s())
    }

    /// Returns `true` if all vertices lie on a single line.
    ///
    /// This is always the case for triangulations with 0, 1 or two vertices.
    fn all_vertices_on_line(&self) -> bool {
        self.num_inner_faces() == 0
    }

    /// Returns an iterator over all half-planes of the convex hull.
    ///
    /// The half-planes are returned in clockwise order as seen from any point _in_ the
    /// triangulation. Returns an empty iterator for fewer than two vertices.
    fn convex_hull(&self) -> HullIterator<'_> {
        HullIterator::new(self.s())
    }

    /// Returns the bounding box of all vertices.
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices().map(|vertex| vertex.position()))
    }

    /// Sets the mark flag of a face.
    fn set_mark<InnerOuter: InnerOuterMarker>(
        &mut self,
        face: FixedFaceHandle<InnerOuter>,
        mark: bool,
    ) {
        self.s_mut().set_mark(face, mark);
    }

    /// Clears the mark flag of all faces.
    fn clear_marks(&mut self) {
        self.s_mut().clear_marks();
    }

    /// Returns all bounded faces whose bounding box intersects `rectangle`.
    ///
    /// The faces are found by a breadth first search starting at the face that contains the
    /// rectangle's center, or at the hull faces if the center lies outside of the convex
    /// hull. The search uses the face marks, which are all cleared when this returns.
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), surface_delaunay::InsertionError> {
    /// use surface_delaunay::{BoundingBox, DelaunayTriangulation, Point, Triangulation};
    ///
    /// let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::bulk_load(vec![
    ///     Point::flat(0.0, 0.0),
    ///     Point::flat(4.0, 0.0),
    ///     Point::flat(4.0, 4.0),
    ///     Point::flat(0.0, 4.0),
    /// ])?;
    ///
    /// let everything = BoundingBox::from_corners(Point::flat(-1.0, -1.0), Point::flat(5.0, 5.0));
    /// assert_eq!(triangulation.bounded_faces_in_rectangle(&everything).len(), 2);
    ///
    /// let elsewhere = BoundingBox::from_corners(Point::flat(6.0, 6.0), Point::flat(7.0, 7.0));
    /// assert!(triangulation.bounded_faces_in_rectangle(&elsewhere).is_empty());
    /// # Ok(()) }
    /// ```
    fn bounded_faces_in_rectangle(
        &mut self,
        rectangle: &BoundingBox,
    ) -> Vec<FixedFaceHandle<InnerTag>> {
        let mut result = Vec::new();
        if rectangle.is_empty() {
            return result;
        }

        let center = rectangle.center();
        let seeds: Vec<_> = match self.find_face(center.x, center.y) {
            Some(face) => vec![face.fix()],
            None => self
                .convex_hull()
                .filter_map(|half_plane| half_plane.neighbors()[0].as_inner())
                .map(|face| face.fix())
                .collect(),
        };

        let mut queue = VecDeque::new();
        for seed in seeds {
            if !self.s().is_marked(seed) && self.face(seed).bounding_box().intersects(rectangle) {
                self.set_mark(seed, true);
                queue.push_back(seed);
            }
        }

        while let Some(face) = queue.pop_front() {
            result.push(face);
            for neighbor in self.s().neighbors(face) {
                let inner = match self.s().as_inner(neighbor) {
                    Some(inner) => inner,
                    None => continue,
                };
                if !self.s().is_marked(inner)
                    && self.face(inner).bounding_box().intersects(rectangle)
                {
                    self.set_mark(inner, true);
                    queue.push_back(inner);
                }
            }
        }

        self.clear_marks();
        result
    }

    /// Checks the structural invariants of the mesh and panics on the first violation.
    ///
    /// Verifies counterclockwise winding, mutual adjacency and shared edge vertices of all
    /// neighboring faces, the closed ring of half-planes and the face references of all
    /// vertices.
    fn sanity_check(&self) {
        self.s().sanity_check();
    }

    /// Removes all vertices and faces.
    fn clear(&mut self) {
        self.s_mut().clear();
        *self.hint_generator_mut() = Default::default();
    }
}
