use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Point;

use super::handles::{FixedFaceHandle, PossiblyOuterTag};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A structure used to speed up point location by providing hints on where to start
/// walking through the mesh.
///
/// Locating a point walks from face to face, starting at the hint. Without a good hint
/// this takes `O(sqrt(n))` steps for `n` uniformly distributed vertices.
///
/// Hints can also be given manually by using the `...with_hint` methods (e.g.
/// [Triangulation::insert_with_hint](crate::Triangulation::insert_with_hint)).
pub trait HintGenerator: Default {
    /// Returns a face handle that should be close to a given position.
    ///
    /// The returned face handle may be invalid.
    fn get_hint(&self, position: Point) -> FixedFaceHandle<PossiblyOuterTag>;

    /// Notifies the hint generator that a face was the result of a lookup
    fn notify_face_lookup(&self, face: FixedFaceHandle<PossiblyOuterTag>);

    /// Notifies the hint generator that a point was inserted next to `face`
    fn notify_vertex_inserted(&mut self, face: FixedFaceHandle<PossiblyOuterTag>, position: Point);
}

/// A hint generator that returns the last touched face as hint.
///
/// This is useful if consecutive insertion or locate queries are spatially close instead of
/// randomly distributed. The walk length is bounded by a constant in this case.
///
/// The face is stored in an atomic so that read-only lookups can update it through a shared
/// reference.
#[derive(Default, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct LastUsedFaceHintGenerator {
    index: AtomicUsize,
}

impl Clone for LastUsedFaceHintGenerator {
    fn clone(&self) -> Self {
        Self {
            index: AtomicUsize::new(self.index.load(Ordering::Relaxed)),
        }
    }
}

impl HintGenerator for LastUsedFaceHintGenerator {
    fn get_hint(&self, _: Point) -> FixedFaceHandle<PossiblyOuterTag> {
        FixedFaceHandle::new(self.index.load(Ordering::Relaxed))
    }

    fn notify_face_lookup(&self, face: FixedFaceHandle<PossiblyOuterTag>) {
        self.index.store(face.index(), Ordering::Relaxed);
    }

    fn notify_vertex_inserted(&mut self, face: FixedFaceHandle<PossiblyOuterTag>, _: Point) {
        self.notify_face_lookup(face);
    }
}
