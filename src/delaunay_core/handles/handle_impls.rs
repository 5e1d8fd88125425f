use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use super::handle_defs::*;
use super::iterators::{CircularIterator, StarNextBackFn, VertexFaceIterator};
use super::public_handles::*;
use crate::{BoundingBox, Circle, HalfPlane, InterpolationError, Point, Triangle};

// Debug implementations
impl<'a> Debug for VertexHandle<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "VertexHandle({:?})", self.handle.index())
    }
}

impl<'a> Debug for FaceHandle<'a, PossiblyOuterTag> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.half_plane_vertices() {
            Some([v0, v1]) => write!(
                f,
                "HalfPlane - id: {:?} ({:?}, {:?})",
                self.handle.index(),
                v0.fix().index(),
                v1.fix().index()
            ),
            None => self.adjust_inner_outer::<InnerTag>().fmt(f),
        }
    }
}

impl<'a> Debug for FaceHandle<'a, InnerTag> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [v0, v1, v2] = self.vertices();
        write!(
            f,
            "FaceHandle - id: {:?} ({:?}, {:?}, {:?})",
            self.handle.index(),
            v0.fix().index(),
            v1.fix().index(),
            v2.fix().index(),
        )
    }
}

impl<'a, Type: Copy, InnerOuter: InnerOuterMarker> Clone for DynamicHandleImpl<'a, Type, InnerOuter> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, Type: Copy, InnerOuter: InnerOuterMarker> Copy for DynamicHandleImpl<'a, Type, InnerOuter> {}

impl<'a, Type: PartialEq, InnerOuter: InnerOuterMarker> PartialEq
    for DynamicHandleImpl<'a, Type, InnerOuter>
{
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<'a, Type: Eq, InnerOuter: InnerOuterMarker> Eq for DynamicHandleImpl<'a, Type, InnerOuter> {}

impl<'a, Type: Hash, InnerOuter: InnerOuterMarker> Hash for DynamicHandleImpl<'a, Type, InnerOuter> {
    fn hash<HA: Hasher>(&self, state: &mut HA) {
        self.handle.hash(state);
    }
}

impl<'a, Type: Ord, InnerOuter: InnerOuterMarker> Ord for DynamicHandleImpl<'a, Type, InnerOuter> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.handle.cmp(&other.handle)
    }
}

impl<'a, Type: PartialOrd, InnerOuter: InnerOuterMarker> PartialOrd
    for DynamicHandleImpl<'a, Type, InnerOuter>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.handle.partial_cmp(&other.handle)
    }
}

impl<'a, Type: Copy + Default, InnerOuter: InnerOuterMarker> DynamicHandleImpl<'a, Type, InnerOuter> {
    /// Converts this dynamic handle to its fixed variant.
    ///
    /// *See also the [handles module](crate::handles)*
    pub fn fix(&self) -> FixedHandleImpl<Type, InnerOuter> {
        self.handle
    }

    /// Returns the internal index of this element.
    ///
    /// Indices will always be in the interval `0` .. `number_of_elements`. Inserting
    /// vertices never changes the index of an existing element.
    pub fn index(&self) -> usize {
        self.handle.index()
    }
}

impl FixedFaceHandle<InnerTag> {
    /// Converts this inner face handle into a possibly outer face handle.
    #[inline]
    pub fn as_possibly_outer(&self) -> FixedFaceHandle<PossiblyOuterTag> {
        self.adjust_inner_outer()
    }
}

impl<'a> VertexHandle<'a> {
    /// Returns the vertex position, including its z payload.
    pub fn position(&self) -> Point {
        self.mesh.position(self.handle)
    }

    /// Returns the z value the vertex was inserted with.
    pub fn z(&self) -> f64 {
        self.position().z
    }

    /// Returns a face adjacent to this vertex.
    ///
    /// Returns `None` if the triangulation has fewer than two vertices.
    pub fn face(&self) -> Option<FaceHandle<'a, PossiblyOuterTag>> {
        self.mesh.vertex_face(self.handle).map(|face| self.mesh.face(face))
    }

    /// Returns all faces adjacent to this vertex in counterclockwise order.
    ///
    /// Vertices on the convex hull are also adjacent to half-planes, which are included.
    pub fn faces(&self) -> VertexFaceIterator<'a> {
        let next_back_fn = StarNextBackFn {
            vertex: self.handle,
        };
        match self.face() {
            Some(face) => CircularIterator::new(face, next_back_fn),
            None => CircularIterator::new_empty(
                FaceHandle::new(self.mesh, FixedFaceHandle::new(0)),
                next_back_fn,
            ),
        }
    }

    /// Returns all bounded faces adjacent to this vertex in counterclockwise order.
    pub fn inner_faces(&self) -> impl Iterator<Item = FaceHandle<'a, InnerTag>> {
        self.faces().filter_map(|face| face.as_inner())
    }
}

impl<'a, InnerOuter: InnerOuterMarker> FaceHandle<'a, InnerOuter> {
    /// Returns `true` if this face is a half-plane outside of the convex hull.
    pub fn is_half_plane(&self) -> bool {
        self.mesh.is_half_plane(self.handle)
    }

    /// Converts this face handle into an inner face handle.
    ///
    /// Returns `None` if this face is a half-plane.
    pub fn as_inner(&self) -> Option<FaceHandle<'a, InnerTag>> {
        self.mesh
            .as_inner(self.handle)
            .map(|inner| FaceHandle::new(self.mesh, inner))
    }

    /// Returns the faces across slot 0, 1 and 2.
    ///
    /// For a bounded face `(a, b, c)` these are the faces across `a - b`, `b - c` and `c - a`.
    /// For a half-plane `(a, b)` these are the face across `a - b`, the next half-plane and the
    /// previous half-plane on the hull.
    pub fn neighbors(&self) -> [FaceHandle<'a, PossiblyOuterTag>; 3] {
        self.mesh
            .neighbors(self.handle)
            .map(|neighbor| self.mesh.face(neighbor))
    }

    /// Returns the neighbor across the edge that ends at `vertex`.
    ///
    /// Repeated calls rotate counterclockwise around `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a corner of this face.
    pub fn neighbor(&self, vertex: FixedVertexHandle) -> FaceHandle<'a, PossiblyOuterTag> {
        self.mesh.face(self.mesh.neighbor(self.handle, vertex))
    }

    /// Pivots around `vertex`, skipping `prev` and half-planes.
    ///
    /// Returns the neighbor across the other edge incident to `vertex` if the counterclockwise
    /// neighbor is either `prev` or a half-plane.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a corner of this face.
    pub fn next_neighbor(
        &self,
        vertex: FixedVertexHandle,
        prev: FixedFaceHandle<PossiblyOuterTag>,
    ) -> FaceHandle<'a, PossiblyOuterTag> {
        self.mesh
            .face(self.mesh.next_neighbor(self.handle, vertex, prev))
    }

    /// Returns the mark flag of this face.
    pub fn is_marked(&self) -> bool {
        self.mesh.is_marked(self.handle)
    }

    /// Returns `true` if `point` lies strictly inside this face's circumcircle.
    ///
    /// Always `false` for half-planes and for the face's own corners.
    pub fn circumcircle_contains(&self, point: Point) -> bool {
        self.mesh.circumcircle_contains(self.handle, point)
    }

    /// Boundary inclusive containment test. Always `false` for half-planes.
    ///
    /// See [Triangle::contains].
    pub fn contains(&self, point: Point) -> bool {
        self.as_inner()
            .map_or(false, |inner| inner.triangle().contains(point))
    }

    /// Boundary exclusive containment test. Always `false` for half-planes.
    ///
    /// See [Triangle::contains_boundary_is_outside].
    pub fn contains_boundary_is_outside(&self, point: Point) -> bool {
        self.as_inner().map_or(false, |inner| {
            inner.triangle().contains_boundary_is_outside(point)
        })
    }
}

impl<'a> FaceHandle<'a, PossiblyOuterTag> {
    /// Returns the two vertices `(a, b)` of a half-plane.
    ///
    /// The half-plane covers the region strictly left of `a -> b`. Returns `None` for bounded
    /// faces.
    pub fn half_plane_vertices(&self) -> Option<[VertexHandle<'a>; 2]> {
        self.mesh
            .half_plane_vertices(self.handle)
            .map(|vertices| vertices.map(|vertex| self.mesh.vertex(vertex)))
    }

    /// Returns the positions of [half_plane_vertices](Self::half_plane_vertices).
    pub fn half_plane_positions(&self) -> Option<[Point; 2]> {
        self.mesh.half_plane_positions(self.handle)
    }

    /// Returns the geometry of this face as a standalone [HalfPlane].
    ///
    /// Returns `None` for bounded faces.
    pub fn half_plane(&self) -> Option<HalfPlane> {
        self.mesh.half_plane(self.handle)
    }

    /// Interpolates the plane through this face's corners at `query`.
    ///
    /// Fails with [InterpolationError::HalfPlane] if this face is a half-plane.
    pub fn z_value(&self, query: Point) -> Result<f64, InterpolationError> {
        match self.as_inner() {
            Some(inner) => inner.z_value(query),
            None => Err(InterpolationError::HalfPlane),
        }
    }
}

impl<'a> FaceHandle<'a, InnerTag> {
    /// Returns the face's three vertices in counterclockwise order.
    pub fn vertices(&self) -> [VertexHandle<'a>; 3] {
        self.mesh
            .bounded_vertices(self.handle)
            .map(|vertex| self.mesh.vertex(vertex))
    }

    /// Returns the positions of the face's three vertices in counterclockwise order.
    pub fn positions(&self) -> [Point; 3] {
        self.mesh.bounded_positions(self.handle)
    }

    /// Returns the face geometry as a standalone [Triangle].
    pub fn triangle(&self) -> Triangle {
        self.mesh.triangle(self.handle)
    }

    /// Returns the cached circumcircle of this face.
    pub fn circumcircle(&self) -> Circle {
        self.mesh.circumcircle(self.handle)
    }

    /// Returns the center of this face's circumcircle.
    pub fn circumcenter(&self) -> Point {
        self.circumcircle().center()
    }

    /// Interpolates the plane through this face's corners at `query`.
    ///
    /// `query` does not need to lie inside the face. A query on one of the corners returns
    /// that corner's z value exactly.
    pub fn z_value(&self, query: Point) -> Result<f64, InterpolationError> {
        self.triangle().z_value(query)
    }

    /// Returns the planar area of this face.
    pub fn area(&self) -> f64 {
        self.triangle().area()
    }

    /// Returns the smallest axis aligned box containing all three corners.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions())
    }
}
