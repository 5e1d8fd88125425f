use smallvec::SmallVec;

use super::handles::*;
use super::math;
use crate::{Circle, HalfPlane, Point, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry and adjacency of a single face.
///
/// Neighbor slots follow the same convention for both variants: slot 0 lies across `a - b`.
/// For a bounded face slot 1 lies across `b - c` and slot 2 across `c - a`. For a half-plane
/// `(a, b)`, slot 1 holds the next half-plane on the hull ring (which starts at `b`) and
/// slot 2 holds the previous one (which ends at `a`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub(super) enum FaceKind {
    Bounded {
        vertices: [FixedVertexHandle; 3],
        neighbors: [FixedFaceHandle<PossiblyOuterTag>; 3],
        circumcircle: Circle,
    },
    HalfPlane {
        vertices: [FixedVertexHandle; 2],
        neighbors: [FixedFaceHandle<PossiblyOuterTag>; 3],
    },
}

impl FaceKind {
    pub(super) fn half_plane(
        vertices: [FixedVertexHandle; 2],
        neighbors: [FixedFaceHandle<PossiblyOuterTag>; 3],
    ) -> Self {
        FaceKind::HalfPlane {
            vertices,
            neighbors,
        }
    }

    pub(super) fn neighbors(&self) -> [FixedFaceHandle<PossiblyOuterTag>; 3] {
        match self {
            FaceKind::Bounded { neighbors, .. } | FaceKind::HalfPlane { neighbors, .. } => {
                *neighbors
            }
        }
    }

    fn neighbors_mut(&mut self) -> &mut [FixedFaceHandle<PossiblyOuterTag>; 3] {
        match self {
            FaceKind::Bounded { neighbors, .. } | FaceKind::HalfPlane { neighbors, .. } => {
                neighbors
            }
        }
    }

    pub(super) fn vertices(&self) -> &[FixedVertexHandle] {
        match self {
            FaceKind::Bounded { vertices, .. } => vertices,
            FaceKind::HalfPlane { vertices, .. } => vertices,
        }
    }

    pub(super) fn is_half_plane(&self) -> bool {
        matches!(self, FaceKind::HalfPlane { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub(super) struct FaceEntry {
    pub(super) kind: FaceKind,
    pub(super) mark: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub(super) struct VertexEntry {
    pub(super) position: Point,
    pub(super) face: Option<FixedFaceHandle<PossiblyOuterTag>>,
}

/// Arena holding all vertices and faces of a triangulation.
///
/// Every link between elements is an index into one of the two arenas. Faces are never
/// removed: flips and splits rewrite existing entries and append new ones.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Mesh {
    pub(super) vertices: Vec<VertexEntry>,
    pub(super) faces: Vec<FaceEntry>,
    pub(super) num_bounded_faces: usize,
}

impl Mesh {
    /// Reserves space for `num_vertices` additional vertices and their faces.
    pub fn reserve_capacity(&mut self, num_vertices: usize) {
        // Roughly two bounded faces per vertex plus the hull
        self.vertices.reserve(num_vertices);
        self.faces.reserve(num_vertices * 2);
    }

    /// Removes all vertices and faces.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.num_bounded_faces = 0;
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces, including half-planes.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of bounded triangles.
    pub fn num_bounded_faces(&self) -> usize {
        self.num_bounded_faces
    }

    /// Number of half-planes, equal to the number of hull edges.
    pub fn num_half_planes(&self) -> usize {
        self.faces.len() - self.num_bounded_faces
    }

    /// Returns a dynamic handle to a vertex.
    pub fn vertex(&self, handle: FixedVertexHandle) -> VertexHandle<'_> {
        VertexHandle::new(self, handle)
    }

    /// Returns a dynamic handle to a face.
    pub fn face<InnerOuter: InnerOuterMarker>(
        &self,
        handle: FixedFaceHandle<InnerOuter>,
    ) -> FaceHandle<'_, InnerOuter> {
        FaceHandle::new(self, handle)
    }

    pub(crate) fn position(&self, vertex: FixedVertexHandle) -> Point {
        self.vertices[vertex.index()].position
    }

    pub(crate) fn vertex_face(
        &self,
        vertex: FixedVertexHandle,
    ) -> Option<FixedFaceHandle<PossiblyOuterTag>> {
        self.vertices[vertex.index()].face
    }

    pub(super) fn kind<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> &FaceKind {
        &self.faces[face.index()].kind
    }

    pub(crate) fn is_half_plane<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> bool {
        self.kind(face).is_half_plane()
    }

    pub(crate) fn as_inner<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> Option<FixedFaceHandle<InnerTag>> {
        if self.is_half_plane(face) {
            None
        } else {
            Some(face.adjust_inner_outer())
        }
    }

    pub(crate) fn neighbors<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> [FixedFaceHandle<PossiblyOuterTag>; 3] {
        self.kind(face).neighbors()
    }

    pub(crate) fn face_vertices<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> SmallVec<[FixedVertexHandle; 3]> {
        self.kind(face).vertices().iter().copied().collect()
    }

    pub(crate) fn bounded_vertices(
        &self,
        face: FixedFaceHandle<InnerTag>,
    ) -> [FixedVertexHandle; 3] {
        match self.kind(face) {
            FaceKind::Bounded { vertices, .. } => *vertices,
            FaceKind::HalfPlane { .. } => Self::inner_tag_violation(face),
        }
    }

    pub(crate) fn half_plane_vertices<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> Option<[FixedVertexHandle; 2]> {
        match self.kind(face) {
            FaceKind::HalfPlane { vertices, .. } => Some(*vertices),
            FaceKind::Bounded { .. } => None,
        }
    }

    pub(crate) fn half_plane_positions<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> Option<[Point; 2]> {
        self.half_plane_vertices(face)
            .map(|vertices| vertices.map(|vertex| self.position(vertex)))
    }

    pub(crate) fn half_plane<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> Option<HalfPlane> {
        self.half_plane_positions(face)
            .map(|[from, to]| HalfPlane::new(from, to))
    }

    /// Returns the corner of `face` that does not lie on the edge shared with `neighbor`.
    pub(crate) fn opposite_vertex(
        &self,
        face: FixedFaceHandle<InnerTag>,
        neighbor: FixedFaceHandle<PossiblyOuterTag>,
    ) -> FixedVertexHandle {
        let slot = self
            .neighbors(face)
            .iter()
            .position(|n| *n == neighbor)
            .unwrap_or_else(|| {
                panic!(
                    "Face {:?} is not a neighbor of {:?}. This is a bug.",
                    neighbor, face
                )
            });
        self.bounded_vertices(face)[(slot + 2) % 3]
    }

    pub(crate) fn circumcircle(&self, face: FixedFaceHandle<InnerTag>) -> Circle {
        match self.kind(face) {
            FaceKind::Bounded { circumcircle, .. } => *circumcircle,
            FaceKind::HalfPlane { .. } => Self::inner_tag_violation(face),
        }
    }

    pub(crate) fn bounded_positions(&self, face: FixedFaceHandle<InnerTag>) -> [Point; 3] {
        self.bounded_vertices(face).map(|vertex| self.position(vertex))
    }

    pub(crate) fn triangle(&self, face: FixedFaceHandle<InnerTag>) -> Triangle {
        Triangle::from_parts(self.bounded_positions(face), self.circumcircle(face))
    }

    /// Returns `true` if `point` lies strictly inside the circumcircle of `face`.
    ///
    /// Always `false` for half-planes and for the face's own corners.
    pub(crate) fn circumcircle_contains<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
        point: Point,
    ) -> bool {
        match self.kind(face) {
            FaceKind::Bounded {
                vertices,
                circumcircle,
                ..
            } => {
                !vertices.iter().any(|v| self.position(*v) == point)
                    && circumcircle.contains(point)
            }
            FaceKind::HalfPlane { .. } => false,
        }
    }

    fn inner_tag_violation<InnerOuter: InnerOuterMarker>(
        face: FixedFaceHandle<InnerOuter>,
    ) -> ! {
        panic!(
            "Face {:?} is tagged as inner but refers to a half-plane. This is a bug.",
            face
        )
    }

    fn corner_index<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
        vertex: FixedVertexHandle,
    ) -> usize {
        self.kind(face)
            .vertices()
            .iter()
            .position(|v| *v == vertex)
            .unwrap_or_else(|| {
                panic!(
                    "Vertex {:?} is not a corner of face {:?}. This is a bug.",
                    vertex, face
                )
            })
    }

    /// Returns the neighbor across the edge that ends in `vertex`.
    ///
    /// For a bounded face `(a, b, c)` this is the `c - a` neighbor for `a`, the `a - b`
    /// neighbor for `b` and the `b - c` neighbor for `c`. Repeatedly calling this rotates
    /// counterclockwise around `vertex`.
    ///
    /// Panics if `vertex` is not a corner of `face`.
    pub(crate) fn neighbor<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
        vertex: FixedVertexHandle,
    ) -> FixedFaceHandle<PossiblyOuterTag> {
        let index = self.corner_index(face, vertex);
        self.neighbors(face)[(index + 2) % 3]
    }

    /// Returns the neighbor across the edge that starts in `vertex`.
    ///
    /// This is the inverse of [Mesh::neighbor]: it rotates clockwise around `vertex`.
    pub(crate) fn neighbor_back<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
        vertex: FixedVertexHandle,
    ) -> FixedFaceHandle<PossiblyOuterTag> {
        let index = self.corner_index(face, vertex);
        self.neighbors(face)[index]
    }

    /// Pivots around `vertex` away from `prev`.
    ///
    /// Returns [Mesh::neighbor] unless that face is `prev` or a half-plane, in which case the
    /// neighbor across the other edge incident to `vertex` is returned.
    pub(crate) fn next_neighbor<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
        vertex: FixedVertexHandle,
        prev: FixedFaceHandle<PossiblyOuterTag>,
    ) -> FixedFaceHandle<PossiblyOuterTag> {
        let candidate = self.neighbor(face, vertex);
        if candidate == prev || self.is_half_plane(candidate) {
            self.neighbor_back(face, vertex)
        } else {
            candidate
        }
    }

    pub(crate) fn is_marked<InnerOuter: InnerOuterMarker>(
        &self,
        face: FixedFaceHandle<InnerOuter>,
    ) -> bool {
        self.faces[face.index()].mark
    }

    pub(crate) fn set_mark<InnerOuter: InnerOuterMarker>(
        &mut self,
        face: FixedFaceHandle<InnerOuter>,
        mark: bool,
    ) {
        self.faces[face.index()].mark = mark;
    }

    pub(crate) fn clear_marks(&mut self) {
        for face in &mut self.faces {
            face.mark = false;
        }
    }

    pub(super) fn push_vertex(&mut self, position: Point) -> FixedVertexHandle {
        let result = FixedVertexHandle::new(self.vertices.len());
        self.vertices.push(VertexEntry {
            position,
            face: None,
        });
        result
    }

    /// Creates the geometry of a bounded face. The corners must be ordered counterclockwise.
    pub(super) fn bounded_kind(
        &self,
        vertices: [FixedVertexHandle; 3],
        neighbors: [FixedFaceHandle<PossiblyOuterTag>; 3],
    ) -> FaceKind {
        let positions = vertices.map(|vertex| self.position(vertex));
        debug_assert!(math::is_strictly_ccw(positions));
        FaceKind::Bounded {
            vertices,
            neighbors,
            circumcircle: math::circumcircle(positions),
        }
    }

    /// Appends a new face and returns its handle.
    pub(super) fn push_face(&mut self, kind: FaceKind) -> FixedFaceHandle<PossiblyOuterTag> {
        let handle = FixedFaceHandle::new(self.faces.len());
        self.faces.push(FaceEntry { kind, mark: false });
        if !kind.is_half_plane() {
            self.num_bounded_faces += 1;
        }
        self.update_vertex_faces(handle);
        handle
    }

    /// Overwrites an existing face.
    ///
    /// A bounded face may only be replaced by another bounded face.
    pub(super) fn write_face<InnerOuter: InnerOuterMarker>(
        &mut self,
        handle: FixedFaceHandle<InnerOuter>,
        kind: FaceKind,
    ) {
        let entry = &mut self.faces[handle.index()];
        match (entry.kind.is_half_plane(), kind.is_half_plane()) {
            (true, false) => self.num_bounded_faces += 1,
            (false, true) => panic!(
                "Cannot turn bounded face {:?} into a half-plane. This is a bug.",
                handle
            ),
            _ => {}
        }
        entry.kind = kind;
        self.update_vertex_faces(handle.adjust_inner_outer());
    }

    fn update_vertex_faces(&mut self, handle: FixedFaceHandle<PossiblyOuterTag>) {
        for vertex in self.face_vertices(handle) {
            self.vertices[vertex.index()].face = Some(handle);
        }
    }

    pub(super) fn set_neighbor<InnerOuter: InnerOuterMarker>(
        &mut self,
        face: FixedFaceHandle<InnerOuter>,
        slot: usize,
        neighbor: FixedFaceHandle<PossiblyOuterTag>,
    ) {
        self.faces[face.index()].kind.neighbors_mut()[slot] = neighbor;
    }

    /// Replaces the first neighbor slot of `face` that equals `old` with `new`.
    ///
    /// Panics if `old` is not a neighbor of `face`.
    pub(super) fn switch_neighbors<InnerOuter: InnerOuterMarker>(
        &mut self,
        face: FixedFaceHandle<InnerOuter>,
        old: FixedFaceHandle<PossiblyOuterTag>,
        new: FixedFaceHandle<PossiblyOuterTag>,
    ) {
        let neighbors = self.faces[face.index()].kind.neighbors_mut();
        match neighbors.iter_mut().find(|neighbor| **neighbor == old) {
            Some(slot) => *slot = new,
            None => panic!(
                "Face {:?} is not a neighbor of {:?}. This is a bug.",
                old, face
            ),
        }
    }

    /// Checks all structural invariants and panics on the first violation.
    pub fn sanity_check(&self) {
        let num_bounded = self.faces.iter().filter(|f| !f.kind.is_half_plane()).count();
        assert_eq!(num_bounded, self.num_bounded_faces);

        if self.num_vertices() <= 1 {
            assert_eq!(self.num_faces(), 0);
            return;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            let face = vertex.face.expect("Vertex without adjacent face");
            assert!(self
                .kind(face)
                .vertices()
                .contains(&FixedVertexHandle::new(index)));
        }

        for index in 0..self.faces.len() {
            let handle = FixedFaceHandle::<PossiblyOuterTag>::new(index);
            let neighbors = self.neighbors(handle);
            for neighbor in neighbors {
                assert!(neighbor.index() < self.faces.len());
                assert!(
                    self.neighbors(neighbor).contains(&handle),
                    "Adjacency of {:?} and {:?} is not mutual",
                    handle,
                    neighbor
                );
            }

            match *self.kind(handle) {
                FaceKind::Bounded { vertices, .. } => {
                    assert!(math::is_strictly_ccw(vertices.map(|v| self.position(v))));
                    for slot in 0..3 {
                        let from = vertices[slot];
                        let to = vertices[(slot + 1) % 3];
                        self.check_edge_shared(neighbors[slot], from, to);
                    }
                }
                FaceKind::HalfPlane { vertices: [a, b], .. } => {
                    self.check_edge_shared(neighbors[0], a, b);
                    let next = self.half_plane_vertices(neighbors[1]).expect("Broken hull ring");
                    let prev = self.half_plane_vertices(neighbors[2]).expect("Broken hull ring");
                    assert_eq!(next[0], b);
                    assert_eq!(prev[1], a);
                    assert_eq!(self.neighbors(neighbors[1])[2], handle);
                    assert_eq!(self.neighbors(neighbors[2])[1], handle);
                }
            }
        }

        if let Some(start) = (0..self.faces.len())
            .map(FixedFaceHandle::<PossiblyOuterTag>::new)
            .find(|face| self.is_half_plane(*face))
        {
            let mut current = start;
            let mut ring_length = 0;
            loop {
                current = self.neighbors(current)[1];
                ring_length += 1;
                if current == start {
                    break;
                }
                assert!(ring_length <= self.num_half_planes());
            }
            assert_eq!(ring_length, self.num_half_planes());
        }
    }

    /// Checks that the face across the directed edge `from -> to` uses that edge reversed.
    fn check_edge_shared(
        &self,
        neighbor: FixedFaceHandle<PossiblyOuterTag>,
        from: FixedVertexHandle,
        to: FixedVertexHandle,
    ) {
        let vertices = self.kind(neighbor).vertices();
        let len = vertices.len();
        let reversed_edge_found = (0..len).any(|i| vertices[i] == to && vertices[(i + 1) % len] == from);
        assert!(
            reversed_edge_found,
            "Face {:?} does not contain edge {:?} -> {:?}",
            neighbor,
            to,
            from
        );
    }
}
