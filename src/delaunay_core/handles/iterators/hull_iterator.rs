use super::{CircularIterator, NextBackFn};
use crate::delaunay_core::Mesh;
use crate::handles::{FaceHandle, FixedFaceHandle, PossiblyOuterTag};

/// Iterates over the half-planes of the convex hull ring.
///
/// Created by [Triangulation::convex_hull](crate::Triangulation::convex_hull).
pub struct HullIterator<'a> {
    inner_iterator: CircularIterator<'a, HullNextBackFn>,
}

/// Steps along the half-plane ring of the convex hull.
#[derive(Clone, Copy, Debug)]
pub struct HullNextBackFn;

impl NextBackFn for HullNextBackFn {
    fn next<'a>(&self, face: FaceHandle<'a, PossiblyOuterTag>) -> FaceHandle<'a, PossiblyOuterTag> {
        face.neighbors()[1]
    }

    fn next_back<'a>(
        &self,
        face: FaceHandle<'a, PossiblyOuterTag>,
    ) -> FaceHandle<'a, PossiblyOuterTag> {
        face.neighbors()[2]
    }
}

impl<'a> HullIterator<'a> {
    pub(crate) fn new(mesh: &'a Mesh) -> Self {
        let first_half_plane = (0..mesh.num_faces())
            .map(FixedFaceHandle::<PossiblyOuterTag>::new)
            .find(|face| mesh.is_half_plane(*face));

        let inner_iterator = match first_half_plane {
            Some(first) => CircularIterator::new(mesh.face(first), HullNextBackFn),
            None => CircularIterator::new_empty(
                FaceHandle::new(mesh, FixedFaceHandle::new(0)),
                HullNextBackFn,
            ),
        };

        Self { inner_iterator }
    }
}

impl<'a> Iterator for HullIterator<'a> {
    type Item = FaceHandle<'a, PossiblyOuterTag>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner_iterator.next()
    }
}

impl<'a> DoubleEndedIterator for HullIterator<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner_iterator.next_back()
    }
}
