use std::collections::VecDeque;

use smallvec::SmallVec;

use super::handles::*;
use super::math;
use super::mesh::Mesh;
use super::mesh_operations;

use crate::{HalfPlane, HintGenerator, InsertionError, LineSide, Point, Triangulation};

impl<T> TriangulationExt for T where T: Triangulation + ?Sized {}

/// Describes the position of a point relative to a triangulation.
///
/// Returned by [Triangulation::locate].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionInTriangulation {
    /// The point lies exactly on a vertex.
    OnVertex(FixedVertexHandle),

    /// The point lies on the edge at the given neighbor slot of a face.
    ///
    /// The face is bounded unless all vertices lie on a single line. In that case it is a
    /// half-plane and the slot is always `0`.
    OnEdge(FixedFaceHandle<PossiblyOuterTag>, usize),

    /// The point lies strictly inside a bounded face.
    OnFace(FixedFaceHandle<InnerTag>),

    /// The point lies outside of the convex hull. The given half-plane contains the point.
    OutsideOfConvexHull(FixedFaceHandle<PossiblyOuterTag>),

    /// The triangulation has fewer than two vertices and does not contain the point, or the
    /// point has a non-finite coordinate.
    NoTriangulation,
}

pub enum PositionWhenAllVerticesOnLine {
    OnEdge(FixedFaceHandle<PossiblyOuterTag>),
    OnVertex(FixedVertexHandle),
    NotOnLine(FixedFaceHandle<PossiblyOuterTag>),
    ExtendingLine(FixedFaceHandle<PossiblyOuterTag>),
}

pub enum InsertionResult {
    NewlyInserted(FixedVertexHandle),
    Duplicate(FixedVertexHandle),
}

enum WalkStep {
    Continue(FixedFaceHandle<PossiblyOuterTag>),
    Done(PositionInTriangulation),
}

pub trait TriangulationExt: Triangulation {
    fn insert_with_hint_option(
        &mut self,
        position: Point,
        hint: Option<FixedFaceHandle<PossiblyOuterTag>>,
    ) -> Result<FixedVertexHandle, InsertionError> {
        math::validate_point(position)?;
        let result = match self.insert_with_hint_option_impl(position, hint) {
            InsertionResult::NewlyInserted(vertex) => vertex,
            InsertionResult::Duplicate(vertex) => {
                log::debug!(
                    "Ignoring duplicate point {}, vertex {:?} already exists",
                    position,
                    vertex
                );
                vertex
            }
        };

        if let Some(face) = self.s().vertex_face(result) {
            self.hint_generator_mut()
                .notify_vertex_inserted(face, position);
        }
        Ok(result)
    }

    fn insert_with_hint_option_impl(
        &mut self,
        position: Point,
        hint: Option<FixedFaceHandle<PossiblyOuterTag>>,
    ) -> InsertionResult {
        use PositionInTriangulation::*;

        match self.num_vertices() {
            0 => InsertionResult::NewlyInserted(mesh_operations::insert_first_vertex(
                self.s_mut(),
                position,
            )),
            1 => self.insert_second_vertex(position),
            _ => {
                if self.all_vertices_on_line() {
                    let location = self.locate_when_all_vertices_on_line(position);
                    self.insert_when_all_vertices_on_line(location, position)
                } else {
                    match self.locate_with_hint_option_core(position, hint) {
                        OutsideOfConvexHull(half_plane) => InsertionResult::NewlyInserted(
                            self.insert_outside_of_convex_hull(half_plane, position),
                        ),
                        OnFace(face) => {
                            InsertionResult::NewlyInserted(self.insert_into_face(face, position))
                        }
                        OnEdge(face, slot) => {
                            InsertionResult::NewlyInserted(self.insert_on_edge(face, slot, position))
                        }
                        OnVertex(vertex) => InsertionResult::Duplicate(vertex),
                        NoTriangulation => panic!("Error during vertex lookup. This is a bug."),
                    }
                }
            }
        }
    }

    fn insert_second_vertex(&mut self, position: Point) -> InsertionResult {
        assert_eq!(self.num_vertices(), 1);

        let first_vertex = FixedVertexHandle::new(0);
        if self.s().position(first_vertex) == position {
            return InsertionResult::Duplicate(first_vertex);
        }

        InsertionResult::NewlyInserted(mesh_operations::insert_second_vertex(
            self.s_mut(),
            position,
        ))
    }

    /// Locates a point while the mesh consists only of the half-plane ring around a line.
    fn locate_when_all_vertices_on_line(&self, position: Point) -> PositionWhenAllVerticesOnLine {
        let mesh = self.s();
        let first = FixedFaceHandle::<PossiblyOuterTag>::new(0);
        let line = expect_half_plane(mesh, first);

        match position.point_line_test(line.a(), line.b()) {
            LineSide::Left => return PositionWhenAllVerticesOnLine::NotOnLine(first),
            LineSide::Right => {
                return PositionWhenAllVerticesOnLine::NotOnLine(mesh.neighbors(first)[0])
            }
            _ => {}
        }

        if let Some(vertex) = self.vertices().find(|v| v.position() == position) {
            return PositionWhenAllVerticesOnLine::OnVertex(vertex.fix());
        }

        for half_plane in self.fixed_all_faces() {
            let segment = expect_half_plane(mesh, half_plane);
            let [twin, next, _] = mesh.neighbors(half_plane);
            match position.point_line_test(segment.a(), segment.b()) {
                LineSide::OnSegment => return PositionWhenAllVerticesOnLine::OnEdge(half_plane),
                // Only the half-planes ending in one of the line's end vertices turn around
                // to their own twin.
                LineSide::BehindB if next == twin => {
                    return PositionWhenAllVerticesOnLine::ExtendingLine(half_plane)
                }
                _ => {}
            }
        }

        panic!("Point {} is on the line but could not be located. This is a bug.", position)
    }

    fn insert_when_all_vertices_on_line(
        &mut self,
        location: PositionWhenAllVerticesOnLine,
        position: Point,
    ) -> InsertionResult {
        match location {
            PositionWhenAllVerticesOnLine::OnEdge(half_plane) => InsertionResult::NewlyInserted(
                mesh_operations::split_line(self.s_mut(), half_plane, position),
            ),
            PositionWhenAllVerticesOnLine::OnVertex(vertex) => InsertionResult::Duplicate(vertex),
            PositionWhenAllVerticesOnLine::NotOnLine(half_plane) => InsertionResult::NewlyInserted(
                self.insert_outside_of_convex_hull(half_plane, position),
            ),
            PositionWhenAllVerticesOnLine::ExtendingLine(end) => InsertionResult::NewlyInserted(
                mesh_operations::extend_line(self.s_mut(), end, position),
            ),
        }
    }

    fn locate_with_hint_option_core(
        &self,
        position: Point,
        hint: Option<FixedFaceHandle<PossiblyOuterTag>>,
    ) -> PositionInTriangulation {
        let start = hint.unwrap_or_else(|| self.hint_generator().get_hint(position));
        self.locate_with_hint_fixed_core(position, start)
    }

    fn insert_outside_of_convex_hull(
        &mut self,
        half_plane: FixedFaceHandle<PossiblyOuterTag>,
        position: Point,
    ) -> FixedVertexHandle {
        let mut visible = self.get_visible_half_planes(half_plane, position);

        let (new_vertex, faces) =
            mesh_operations::extend_hull(self.s_mut(), visible.make_contiguous(), position);
        log::trace!(
            "Extended convex hull over {} edges with vertex {:?}",
            faces.len(),
            new_vertex
        );

        self.legalize_edges(faces.into_iter().map(|face| (face, 0)));
        new_vertex
    }

    /// Returns the contiguous arc of hull half-planes that contain `position`, in ring
    /// order.
    fn get_visible_half_planes(
        &self,
        start: FixedFaceHandle<PossiblyOuterTag>,
        position: Point,
    ) -> VecDeque<FixedFaceHandle<PossiblyOuterTag>> {
        let mesh = self.s();
        let is_visible =
            |half_plane| expect_half_plane(mesh, half_plane).is_visible_from(position);

        debug_assert!(is_visible(start));

        let mut result = VecDeque::with_capacity(8);
        result.push_back(start);

        let mut current_forward = start;
        loop {
            current_forward = mesh.neighbors(current_forward)[1];
            if current_forward != start && is_visible(current_forward) {
                result.push_back(current_forward);
            } else {
                break;
            }
        }

        let mut current_backward = start;
        loop {
            current_backward = mesh.neighbors(current_backward)[2];
            if !result.contains(&current_backward) && is_visible(current_backward) {
                result.push_front(current_backward);
            } else {
                break;
            }
        }
        result
    }

    fn insert_into_face(
        &mut self,
        face: FixedFaceHandle<InnerTag>,
        position: Point,
    ) -> FixedVertexHandle {
        let (new_vertex, faces) = mesh_operations::insert_into_face(self.s_mut(), face, position);
        self.legalize_edges(faces.map(|face| (face, 0)));
        new_vertex
    }

    fn insert_on_edge(
        &mut self,
        face: FixedFaceHandle<PossiblyOuterTag>,
        slot: usize,
        position: Point,
    ) -> FixedVertexHandle {
        let face = self.s().as_inner(face).unwrap_or_else(|| {
            panic!(
                "Edge split requested on half-plane {:?}. This is a bug.",
                face
            )
        });
        let (new_vertex, edges) = mesh_operations::split_edge(self.s_mut(), face, slot, position);
        self.legalize_edges(edges);
        new_vertex
    }

    /// Restores the Delaunay property after an insertion by flipping edges.
    ///
    /// Every given `(face, slot)` pair names an edge whose opposite corner in `face` is the
    /// newly inserted vertex. An edge is flipped if the vertex on its other side lies strictly
    /// inside the face's circumcircle. Each flip yields two new edges opposite of the new
    /// vertex that need to be checked in turn. Since the new vertex gains a neighbor with every
    /// flip, this terminates.
    ///
    /// ```text
    ///          v                      v
    ///         / \                    /|\
    ///        /   \                  / | \
    ///       a-----b      ->        a  |  b
    ///        \   /                  \ | /
    ///         \ /                    \|/
    ///          d                      d
    /// ```
    fn legalize_edges(
        &mut self,
        edges: impl IntoIterator<Item = (FixedFaceHandle<InnerTag>, usize)>,
    ) {
        let mut edges: SmallVec<[_; 8]> = edges.into_iter().collect();

        while let Some((face, slot)) = edges.pop() {
            let mesh = self.s();
            let neighbor = mesh.neighbors(face)[slot];
            let other = match mesh.as_inner(neighbor) {
                Some(other) => other,
                None => continue,
            };

            let positions = mesh.bounded_positions(face);
            let a = positions[slot];
            let b = positions[(slot + 1) % 3];
            let v = positions[(slot + 2) % 3];
            let d = mesh.position(mesh.opposite_vertex(other, face.as_possibly_outer()));

            let should_flip = mesh.circumcircle_contains(face, d)
                && math::is_strictly_ccw([a, d, v])
                && math::is_strictly_ccw([d, b, v]);

            if should_flip {
                log::trace!("Flipping edge {} - {} towards {}", a, b, d);
                edges.extend(mesh_operations::flip(self.s_mut(), face, slot));
            }
        }
    }

    fn validate_face_handle(
        &self,
        handle: FixedFaceHandle<PossiblyOuterTag>,
    ) -> FixedFaceHandle<PossiblyOuterTag> {
        if handle.index() < self.s().num_faces() {
            handle
        } else {
            FixedFaceHandle::new(0)
        }
    }

    /// "Walks" through the triangulation until it finds the target point.
    ///
    /// Starting at `start`, each step crosses the first edge of the current face that has
    /// the target strictly on its right side. The walk ends at a bounded face that contains
    /// the target, or at a half-plane that contains it.
    fn locate_with_hint_fixed_core(
        &self,
        target_position: Point,
        start: FixedFaceHandle<PossiblyOuterTag>,
    ) -> PositionInTriangulation {
        if self.num_vertices() < 2 {
            return match self.vertices().next() {
                Some(single_vertex) if single_vertex.position() == target_position => {
                    PositionInTriangulation::OnVertex(single_vertex.fix())
                }
                _ => PositionInTriangulation::NoTriangulation,
            };
        }

        if !target_position.is_finite() {
            return PositionInTriangulation::NoTriangulation;
        }

        if self.all_vertices_on_line() {
            return match self.locate_when_all_vertices_on_line(target_position) {
                PositionWhenAllVerticesOnLine::OnEdge(half_plane) => {
                    PositionInTriangulation::OnEdge(half_plane, 0)
                }
                PositionWhenAllVerticesOnLine::OnVertex(vertex) => {
                    PositionInTriangulation::OnVertex(vertex)
                }
                PositionWhenAllVerticesOnLine::NotOnLine(half_plane)
                | PositionWhenAllVerticesOnLine::ExtendingLine(half_plane) => {
                    PositionInTriangulation::OutsideOfConvexHull(half_plane)
                }
            };
        }

        self.walk_with_step_budget(target_position, start, self.s().num_faces())
    }

    /// Walks for at most `max_steps` faces before falling back to a linear scan.
    ///
    /// Expects at least one bounded face.
    fn walk_with_step_budget(
        &self,
        target_position: Point,
        start: FixedFaceHandle<PossiblyOuterTag>,
        max_steps: usize,
    ) -> PositionInTriangulation {
        let mesh = self.s();
        let mut current = self.validate_face_handle(start);
        for _ in 0..max_steps {
            match walk_step(mesh, current, target_position) {
                WalkStep::Continue(next) => current = next,
                WalkStep::Done(result) => {
                    self.notify_lookup(result);
                    return result;
                }
            }
        }

        log::warn!(
            "Point location of {} did not terminate after {} steps, falling back to a linear scan",
            target_position,
            max_steps
        );

        let result = (0..mesh.num_faces())
            .map(FixedFaceHandle::<PossiblyOuterTag>::new)
            .find_map(|face| match walk_step(mesh, face, target_position) {
                WalkStep::Done(result) => Some(result),
                WalkStep::Continue(_) => None,
            })
            .unwrap_or_else(|| {
                panic!(
                    "No face contains point {}. This is a bug.",
                    target_position
                )
            });
        self.notify_lookup(result);
        result
    }

    fn notify_lookup(&self, position: PositionInTriangulation) {
        let face = match position {
            PositionInTriangulation::OnVertex(vertex) => self.s().vertex_face(vertex),
            PositionInTriangulation::OnEdge(face, _)
            | PositionInTriangulation::OutsideOfConvexHull(face) => Some(face),
            PositionInTriangulation::OnFace(face) => Some(face.as_possibly_outer()),
            PositionInTriangulation::NoTriangulation => None,
        };
        if let Some(face) = face {
            self.hint_generator().notify_face_lookup(face);
        }
    }
}

fn walk_step(mesh: &Mesh, face: FixedFaceHandle<PossiblyOuterTag>, target: Point) -> WalkStep {
    let inner = match mesh.as_inner(face) {
        Some(inner) => inner,
        None => {
            return if expect_half_plane(mesh, face).is_visible_from(target) {
                WalkStep::Done(PositionInTriangulation::OutsideOfConvexHull(face))
            } else {
                // The target lies on the hull edge's line or inside the hull
                WalkStep::Continue(mesh.neighbors(face)[0])
            };
        }
    };

    let positions = mesh.bounded_positions(inner);
    let neighbors = mesh.neighbors(inner);
    let mut on_line = None;
    for slot in 0..3 {
        let side = target.point_line_test(positions[slot], positions[(slot + 1) % 3]);
        if side.is_right() {
            return WalkStep::Continue(neighbors[slot]);
        }
        if side.is_on_line() {
            on_line = Some(slot);
        }
    }

    // The target lies inside the closed triangle
    if let Some(corner) = mesh
        .bounded_vertices(inner)
        .into_iter()
        .find(|vertex| mesh.position(*vertex) == target)
    {
        return WalkStep::Done(PositionInTriangulation::OnVertex(corner));
    }

    WalkStep::Done(match on_line {
        Some(slot) => PositionInTriangulation::OnEdge(face, slot),
        None => PositionInTriangulation::OnFace(inner),
    })
}

fn expect_half_plane(mesh: &Mesh, face: FixedFaceHandle<PossiblyOuterTag>) -> HalfPlane {
    mesh.half_plane(face).unwrap_or_else(|| {
        panic!(
            "Expected {:?} to be a half-plane. This is a bug.",
            face
        )
    })
}

#[cfg(test)]
mod test {
    use crate::handles::{FixedFaceHandle, PossiblyOuterTag};
    use crate::test_utilities::{random_points_in_range, random_points_with_seed, SEED, SEED2};
    use crate::{
        DelaunayTriangulation, InsertionError, Point, PositionInTriangulation, Triangulation,
    };

    use super::TriangulationExt;

    #[test]
    fn test_locate_empty_and_single() -> Result<(), InsertionError> {
        let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
        assert_eq!(
            triangulation.locate(0.0, 0.0),
            PositionInTriangulation::NoTriangulation
        );
        let vertex = triangulation.insert(Point::flat(1.0, 1.0))?;
        assert_eq!(
            triangulation.locate(1.0, 1.0),
            PositionInTriangulation::OnVertex(vertex)
        );
        assert_eq!(
            triangulation.locate(0.0, 1.0),
            PositionInTriangulation::NoTriangulation
        );
        Ok(())
    }

    #[test]
    fn test_locate_on_line() -> Result<(), InsertionError> {
        let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
        let v0 = triangulation.insert(Point::flat(0.0, 0.0))?;
        triangulation.insert(Point::flat(2.0, 2.0))?;

        assert_eq!(
            triangulation.locate(0.0, 0.0),
            PositionInTriangulation::OnVertex(v0)
        );
        assert!(matches!(
            triangulation.locate(1.0, 1.0),
            PositionInTriangulation::OnEdge(_, 0)
        ));
        assert!(matches!(
            triangulation.locate(3.0, 3.0),
            PositionInTriangulation::OutsideOfConvexHull(_)
        ));
        match triangulation.locate(0.0, 1.0) {
            PositionInTriangulation::OutsideOfConvexHull(half_plane) => {
                let half_plane = triangulation.face(half_plane).half_plane().unwrap();
                assert!(half_plane.is_visible_from(Point::flat(0.0, 1.0)));
            }
            other => panic!("Unexpected location {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_locate_in_triangle() -> Result<(), InsertionError> {
        let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
        let v0 = triangulation.insert(Point::flat(0.0, 0.0))?;
        triangulation.insert(Point::flat(1.0, 0.0))?;
        triangulation.insert(Point::flat(0.0, 1.0))?;

        assert!(matches!(
            triangulation.locate(0.25, 0.25),
            PositionInTriangulation::OnFace(_)
        ));
        assert_eq!(
            triangulation.locate(0.0, 0.0),
            PositionInTriangulation::OnVertex(v0)
        );
        match triangulation.locate(0.5, 0.5) {
            PositionInTriangulation::OnEdge(face, slot) => {
                let face = triangulation.face(face).as_inner().unwrap();
                let positions = face.positions();
                let from = positions[slot];
                let to = positions[(slot + 1) % 3];
                assert!(Point::flat(0.5, 0.5).point_line_test(from, to).is_on_line());
            }
            other => panic!("Unexpected location {:?}", other),
        }
        assert!(matches!(
            triangulation.locate(0.75, 0.75),
            PositionInTriangulation::OutsideOfConvexHull(_)
        ));
        assert!(matches!(
            triangulation.locate(-1.0, 0.0),
            PositionInTriangulation::OutsideOfConvexHull(_)
        ));
        assert_eq!(
            triangulation.locate(f64::NAN, 0.0),
            PositionInTriangulation::NoTriangulation
        );
        Ok(())
    }

    #[test]
    fn test_locate_with_invalid_hint() {
        let triangulation: DelaunayTriangulation =
            random_points_with_seed(100, SEED).into_iter().collect();
        let bogus = FixedFaceHandle::<PossiblyOuterTag>::new(100_000);
        for point in random_points_with_seed(50, SEED2) {
            let with_hint = triangulation.locate_with_hint(point.x, point.y, bogus);
            match (with_hint, triangulation.locate(point.x, point.y)) {
                // Several half-planes may contain a point outside of the hull
                (
                    PositionInTriangulation::OutsideOfConvexHull(_),
                    PositionInTriangulation::OutsideOfConvexHull(_),
                ) => {}
                (with_hint, without_hint) => assert_eq!(with_hint, without_hint),
            }
        }
    }

    #[test]
    fn test_locate_finds_every_vertex() {
        let points = random_points_with_seed(200, SEED);
        let triangulation: DelaunayTriangulation = points.iter().copied().collect();
        for point in points {
            let vertex = triangulation.locate_vertex(point.x, point.y).unwrap();
            assert_eq!(vertex.position(), point);
            assert_eq!(vertex.z(), point.z);
        }
    }

    #[test]
    fn test_visible_half_planes_are_contiguous() -> Result<(), InsertionError> {
        let mut triangulation: DelaunayTriangulation = DelaunayTriangulation::new();
        for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (2.0, -1.0)] {
            triangulation.insert(Point::flat(x, y))?;
        }

        let query = Point::flat(2.0, -10.0);
        let start = match triangulation.locate(query.x, query.y) {
            PositionInTriangulation::OutsideOfConvexHull(half_plane) => half_plane,
            other => panic!("Unexpected location {:?}", other),
        };
        let visible = triangulation.get_visible_half_planes(start, query);
        // Only the two lower hull edges see the query
        assert_eq!(visible.len(), 2);
        let [_, first_to] = triangulation.face(visible[0]).half_plane_positions().unwrap();
        let [second_from, _] = triangulation.face(visible[1]).half_plane_positions().unwrap();
        assert_eq!(first_to, second_from);
        Ok(())
    }

    #[test]
    fn test_linear_scan_matches_walk() {
        let points = random_points_with_seed(100, SEED);
        let triangulation: DelaunayTriangulation = points.iter().copied().collect();
        let start = FixedFaceHandle::<PossiblyOuterTag>::new(0);

        let queries = random_points_in_range(1.5, 50, SEED2)
            .into_iter()
            .chain(points.iter().copied().take(20));

        for query in queries {
            let walked = triangulation.walk_with_step_budget(query, start, usize::MAX);
            let scanned = triangulation.walk_with_step_budget(query, start, 0);
            match (walked, scanned) {
                // Several half-planes may contain a point outside of the hull
                (
                    PositionInTriangulation::OutsideOfConvexHull(_),
                    PositionInTriangulation::OutsideOfConvexHull(half_plane),
                ) => {
                    let half_plane = triangulation.face(half_plane).half_plane().unwrap();
                    assert!(half_plane.is_visible_from(query));
                }
                (walked, scanned) => assert_eq!(walked, scanned),
            }
        }
    }
}
