//! Local mesh edits.
//!
//! Every operation reads the affected entries first and then writes the new state of all
//! of them, so the mesh is consistent again once the function returns. None of these
//! functions legalize edges, see `triangulation_ext` for that.

use smallvec::SmallVec;

use super::handles::*;
use super::mesh::{FaceKind, Mesh};
use crate::Point;

fn rotated<T: Copy>(values: [T; 3], offset: usize) -> [T; 3] {
    [
        values[offset % 3],
        values[(offset + 1) % 3],
        values[(offset + 2) % 3],
    ]
}

fn slot_of<InnerOuter: InnerOuterMarker>(
    mesh: &Mesh,
    face: FixedFaceHandle<InnerOuter>,
    neighbor: FixedFaceHandle<PossiblyOuterTag>,
) -> usize {
    mesh.neighbors(face)
        .iter()
        .position(|n| *n == neighbor)
        .unwrap_or_else(|| {
            panic!(
                "Face {:?} is not a neighbor of {:?}. This is a bug.",
                neighbor, face
            )
        })
}

fn next_face_handle(mesh: &Mesh, offset: usize) -> FixedFaceHandle<PossiblyOuterTag> {
    FixedFaceHandle::new(mesh.num_faces() + offset)
}

pub fn insert_first_vertex(mesh: &mut Mesh, position: Point) -> FixedVertexHandle {
    assert_eq!(mesh.num_vertices(), 0);
    mesh.push_vertex(position)
}

/// Connects the second vertex to the first one with two twin half-planes.
///
/// Both half-planes use each other for all three neighbor slots: they form the whole
/// hull ring and are each other's inner neighbor.
pub fn insert_second_vertex(mesh: &mut Mesh, position: Point) -> FixedVertexHandle {
    assert_eq!(mesh.num_vertices(), 1);
    let v0 = FixedVertexHandle::new(0);
    let v1 = mesh.push_vertex(position);

    let h0 = next_face_handle(mesh, 0);
    let h1 = next_face_handle(mesh, 1);
    mesh.push_face(FaceKind::half_plane([v0, v1], [h1, h1, h1]));
    mesh.push_face(FaceKind::half_plane([v1, v0], [h0, h0, h0]));
    v1
}

/// Splits the segment covered by `upper` and its twin at a collinear `position`.
///
/// Only valid while all vertices lie on a single line.
pub fn split_line(
    mesh: &mut Mesh,
    upper: FixedFaceHandle<PossiblyOuterTag>,
    position: Point,
) -> FixedVertexHandle {
    //   x ------- u ------> y            x -- u1 --> v -- u2 --> y
    //   x <------ l ------- y            x <-- l2 -- v <-- l1 -- y
    let [x, y] = half_plane_vertices(mesh, upper);
    let [lower, upper_next, upper_prev] = mesh.neighbors(upper);
    let [_, lower_next, lower_prev] = mesh.neighbors(lower);

    let v = mesh.push_vertex(position);
    let u2 = next_face_handle(mesh, 0);
    let l2 = next_face_handle(mesh, 1);

    mesh.write_face(upper, FaceKind::half_plane([x, v], [l2, u2, upper_prev]));
    mesh.write_face(lower, FaceKind::half_plane([y, v], [u2, l2, lower_prev]));
    mesh.push_face(FaceKind::half_plane([v, y], [lower, upper_next, upper]));
    mesh.push_face(FaceKind::half_plane([v, x], [upper, lower_next, lower]));

    // These may overwrite the `prev` links above if the split segment is an end segment
    mesh.set_neighbor(upper_next, 2, u2);
    mesh.set_neighbor(lower_next, 2, l2);
    v
}

/// Extends the line of collinear vertices beyond its end.
///
/// `end` must be the half-plane `(q, e)` whose next half-plane is its own twin `(e, q)`,
/// with `position` lying beyond `e`.
pub fn extend_line(
    mesh: &mut Mesh,
    end: FixedFaceHandle<PossiblyOuterTag>,
    position: Point,
) -> FixedVertexHandle {
    //   q ------ end -----> e             q --- end ---> e --- x2 ---> v
    //   q <----- twin ----- e             q <-- twin --- e <-- y2 ---- v
    let [_, e] = half_plane_vertices(mesh, end);
    let twin = mesh.neighbors(end)[0];
    debug_assert_eq!(mesh.neighbors(end)[1], twin);

    let v = mesh.push_vertex(position);
    let x2 = next_face_handle(mesh, 0);
    let y2 = next_face_handle(mesh, 1);

    mesh.push_face(FaceKind::half_plane([e, v], [y2, y2, end]));
    mesh.push_face(FaceKind::half_plane([v, e], [x2, twin, x2]));
    mesh.set_neighbor(end, 1, x2);
    mesh.set_neighbor(twin, 2, y2);
    v
}

/// Splits a bounded face into three faces sharing the new vertex.
///
/// Returns the new vertex and the three faces. Slot 0 of every returned face lies across
/// one of the original edges.
pub fn insert_into_face(
    mesh: &mut Mesh,
    face: FixedFaceHandle<InnerTag>,
    position: Point,
) -> (FixedVertexHandle, [FixedFaceHandle<InnerTag>; 3]) {
    // Original triangle:
    //          c
    //         / \
    //    nca /   \ nbc
    //       /  f  \
    //      a ----- b
    //         nab
    //
    // With v inserted:
    //          c
    //         /|\
    //        / | \
    //       /t2|t1\
    //      /  _v_  \
    //     / _/ f \_ \
    //    a --------- b
    let [a, b, c] = mesh.bounded_vertices(face);
    let [nab, nbc, nca] = mesh.neighbors(face);

    let v = mesh.push_vertex(position);
    let f = face.adjust_inner_outer();
    let t1 = next_face_handle(mesh, 0);
    let t2 = next_face_handle(mesh, 1);

    let kind = mesh.bounded_kind([a, b, v], [nab, t1, t2]);
    mesh.write_face(face, kind);
    let kind = mesh.bounded_kind([b, c, v], [nbc, t2, f]);
    mesh.push_face(kind);
    let kind = mesh.bounded_kind([c, a, v], [nca, f, t1]);
    mesh.push_face(kind);

    mesh.switch_neighbors(nbc, f, t1);
    mesh.switch_neighbors(nca, f, t2);

    (
        v,
        [face, t1.adjust_inner_outer(), t2.adjust_inner_outer()],
    )
}

/// Splits the edge at `slot` of a bounded face.
///
/// If the other side of the edge is a bounded face, both faces are split in two. If it is a
/// half-plane, the bounded face and the half-plane are split in two.
///
/// Returns the new vertex and the edges (face and slot) that may need legalization.
pub fn split_edge(
    mesh: &mut Mesh,
    face: FixedFaceHandle<InnerTag>,
    slot: usize,
    position: Point,
) -> (FixedVertexHandle, SmallVec<[(FixedFaceHandle<InnerTag>, usize); 4]>) {
    let [a, b, c] = rotated(mesh.bounded_vertices(face), slot);
    let [other, f_bc, f_ca] = rotated(mesh.neighbors(face), slot);
    let f = face.adjust_inner_outer();

    let mut result = SmallVec::new();
    match mesh.as_inner(other) {
        None => {
            //          c                      c
            //         / \                    /|\
            //        / f \        ->        / | \
            //       /     \                /F1|F0\
            //      a ----- b              a---v---b
            //       (other)                H2   H1
            debug_assert_eq!(mesh.half_plane_vertices(other), Some([b, a]));
            let [_, h_next, h_prev] = mesh.neighbors(other);

            let v = mesh.push_vertex(position);
            let f1 = next_face_handle(mesh, 0);
            let h2 = next_face_handle(mesh, 1);

            let kind = mesh.bounded_kind([v, b, c], [other, f_bc, f1]);
            mesh.write_face(face, kind);
            mesh.write_face(other, FaceKind::half_plane([b, v], [f, h2, h_prev]));
            let kind = mesh.bounded_kind([v, c, a], [f, f_ca, h2]);
            mesh.push_face(kind);
            mesh.push_face(FaceKind::half_plane([v, a], [f1, h_next, other]));

            mesh.switch_neighbors(f_ca, f, f1);
            mesh.set_neighbor(h_next, 2, h2);

            result.push((face, 1));
            result.push((f1.adjust_inner_outer(), 1));
            (v, result)
        }
        Some(g) => {
            //          c                      c
            //         / \                    /|\
            //        / f \                  /F1|F0\
            //       a-----b       ->       a---v---b
            //        \ g /                  \G0|G1/
            //         \ /                    \|/
            //          d                      d
            let g_slot = slot_of(mesh, g, f);
            let [_, _, d] = rotated(mesh.bounded_vertices(g), g_slot);
            let [_, g_ad, g_db] = rotated(mesh.neighbors(g), g_slot);

            let v = mesh.push_vertex(position);
            let f1 = next_face_handle(mesh, 0);
            let g1 = next_face_handle(mesh, 1);

            let kind = mesh.bounded_kind([v, b, c], [g1, f_bc, f1]);
            mesh.write_face(face, kind);
            let kind = mesh.bounded_kind([v, a, d], [f1, g_ad, g1]);
            mesh.write_face(g, kind);
            let kind = mesh.bounded_kind([v, c, a], [f, f_ca, other]);
            mesh.push_face(kind);
            let kind = mesh.bounded_kind([v, d, b], [other, g_db, f]);
            mesh.push_face(kind);

            mesh.switch_neighbors(f_ca, f, f1);
            mesh.switch_neighbors(g_db, other, g1);

            result.extend([
                (face, 1),
                (f1.adjust_inner_outer(), 1),
                (g, 1),
                (g1.adjust_inner_outer(), 1),
            ]);
            (v, result)
        }
    }
}

/// Connects a vertex outside of the convex hull to every hull edge visible from it.
///
/// `visible` must be a contiguous arc of the hull ring given in ring order, containing
/// exactly the half-planes from which `position` lies strictly inside. Each of them is
/// turned into a bounded face, and two new half-planes close the hull again.
///
/// Returns the new vertex and the new bounded faces. Slot 0 of each face lies across its
/// former hull edge.
pub fn extend_hull(
    mesh: &mut Mesh,
    visible: &[FixedFaceHandle<PossiblyOuterTag>],
    position: Point,
) -> (FixedVertexHandle, SmallVec<[FixedFaceHandle<InnerTag>; 8]>) {
    //                     v
    //                  _/ | \_
    //            A   _/   |   \_   B
    //              _/ T1  | T2  \_
    //    - P - - s ------ m ------ e - - N -
    //               (H1)     (H2)
    let first = visible[0];
    let last = visible[visible.len() - 1];
    let [s, _] = half_plane_vertices(mesh, first);
    let [_, e] = half_plane_vertices(mesh, last);
    let prev = mesh.neighbors(first)[2];
    let next = mesh.neighbors(last)[1];

    let inner_neighbors: SmallVec<[_; 8]> = visible
        .iter()
        .map(|half_plane| mesh.neighbors(*half_plane)[0])
        .collect();
    let edges: SmallVec<[_; 8]> = visible
        .iter()
        .map(|half_plane| half_plane_vertices(mesh, *half_plane))
        .collect();

    let v = mesh.push_vertex(position);
    let new_a = next_face_handle(mesh, 0);
    let new_b = next_face_handle(mesh, 1);

    let mut result = SmallVec::new();
    for (index, half_plane) in visible.iter().enumerate() {
        let [from, to] = edges[index];
        let ccw_neighbor = visible.get(index + 1).copied().unwrap_or(new_b);
        let cw_neighbor = if index == 0 { new_a } else { visible[index - 1] };
        let kind = mesh.bounded_kind(
            [from, to, v],
            [inner_neighbors[index], ccw_neighbor, cw_neighbor],
        );
        mesh.write_face(*half_plane, kind);
        result.push(half_plane.adjust_inner_outer());
    }

    mesh.push_face(FaceKind::half_plane([s, v], [first, new_b, prev]));
    mesh.push_face(FaceKind::half_plane([v, e], [last, next, new_a]));
    // `prev` and `next` coincide if the hull consisted of a single twin pair
    mesh.set_neighbor(prev, 1, new_a);
    mesh.set_neighbor(next, 2, new_b);

    (v, result)
}

/// Flips the edge at `slot` of `face`. The face on the other side must be bounded and the
/// quad formed by both faces must be strictly convex.
///
/// Returns the two edges opposite of the flipped diagonal's former apex that may need
/// further legalization, given as (face, slot).
pub fn flip(
    mesh: &mut Mesh,
    face: FixedFaceHandle<InnerTag>,
    slot: usize,
) -> [(FixedFaceHandle<InnerTag>, usize); 2] {
    // Before:                    After:
    //          c                          c
    //         / \                        /|\
    //        / f \                      / | \
    //       a-----b                    a f|g b
    //        \ g /                      \ | /
    //         \ /                        \|/
    //          d                          d
    let [a, b, c] = rotated(mesh.bounded_vertices(face), slot);
    let [g, f_bc, f_ca] = rotated(mesh.neighbors(face), slot);
    let other = mesh.as_inner(g).unwrap_or_else(|| {
        panic!(
            "Cannot flip edge between {:?} and half-plane {:?}. This is a bug.",
            face, g
        )
    });
    let g_slot = slot_of(mesh, other, face.adjust_inner_outer());
    let [_, _, d] = rotated(mesh.bounded_vertices(other), g_slot);
    let [_, g_ad, g_db] = rotated(mesh.neighbors(other), g_slot);
    let f = face.adjust_inner_outer();

    let kind = mesh.bounded_kind([a, d, c], [g_ad, g, f_ca]);
    mesh.write_face(face, kind);
    let kind = mesh.bounded_kind([d, b, c], [g_db, f_bc, f]);
    mesh.write_face(other, kind);

    mesh.switch_neighbors(g_ad, g, f);
    mesh.switch_neighbors(f_bc, f, g);

    [(face, 0), (other, 0)]
}

fn half_plane_vertices(
    mesh: &Mesh,
    face: FixedFaceHandle<PossiblyOuterTag>,
) -> [FixedVertexHandle; 2] {
    mesh.half_plane_vertices(face).unwrap_or_else(|| {
        panic!(
            "Expected {:?} to be a half-plane. This is a bug.",
            face
        )
    })
}
