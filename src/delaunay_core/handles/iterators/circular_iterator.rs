use super::super::{FaceHandle, FixedVertexHandle, PossiblyOuterTag};

/// Describes how a [CircularIterator] steps from one face to the next.
pub trait NextBackFn: Copy {
    /// Returns the face following `face`.
    fn next<'a>(&self, face: FaceHandle<'a, PossiblyOuterTag>) -> FaceHandle<'a, PossiblyOuterTag>;

    /// Returns the face preceding `face`.
    fn next_back<'a>(
        &self,
        face: FaceHandle<'a, PossiblyOuterTag>,
    ) -> FaceHandle<'a, PossiblyOuterTag>;
}

/// Iterates over a closed cycle of faces, starting and ending at the same face.
pub struct CircularIterator<'a, NB> {
    current_handle: FaceHandle<'a, PossiblyOuterTag>,
    final_handle: FaceHandle<'a, PossiblyOuterTag>,
    iteration_finished: bool,
    next_back_fn: NB,
}

impl<'a, NB: NextBackFn> CircularIterator<'a, NB> {
    /// Creates an iterator over the whole cycle that contains `start_face`.
    pub fn new(start_face: FaceHandle<'a, PossiblyOuterTag>, next_back_fn: NB) -> Self {
        CircularIterator {
            current_handle: start_face,
            final_handle: start_face,
            iteration_finished: false,
            next_back_fn,
        }
    }

    /// Creates an iterator that yields nothing.
    pub fn new_empty(some_face: FaceHandle<'a, PossiblyOuterTag>, next_back_fn: NB) -> Self {
        CircularIterator {
            current_handle: some_face,
            final_handle: some_face,
            iteration_finished: true,
            next_back_fn,
        }
    }
}

impl<'a, NB: NextBackFn> Iterator for CircularIterator<'a, NB> {
    type Item = FaceHandle<'a, PossiblyOuterTag>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.iteration_finished {
            return None;
        }
        let result = self.current_handle;
        self.current_handle = self.next_back_fn.next(self.current_handle);
        if self.current_handle == self.final_handle {
            self.iteration_finished = true;
        }
        Some(result)
    }
}

impl<'a, NB: NextBackFn> DoubleEndedIterator for CircularIterator<'a, NB> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.iteration_finished {
            return None;
        }
        self.final_handle = self.next_back_fn.next_back(self.final_handle);
        if self.current_handle == self.final_handle {
            self.iteration_finished = true;
        }
        Some(self.final_handle)
    }
}

/// Rotates around a vertex: counterclockwise forward, clockwise backward.
#[derive(Clone, Copy, Debug)]
pub struct StarNextBackFn {
    pub(crate) vertex: FixedVertexHandle,
}

impl NextBackFn for StarNextBackFn {
    fn next<'a>(&self, face: FaceHandle<'a, PossiblyOuterTag>) -> FaceHandle<'a, PossiblyOuterTag> {
        face.neighbor(self.vertex)
    }

    fn next_back<'a>(
        &self,
        face: FaceHandle<'a, PossiblyOuterTag>,
    ) -> FaceHandle<'a, PossiblyOuterTag> {
        let neighbor = face.mesh.neighbor_back(face.handle, self.vertex);
        face.mesh.face(neighbor)
    }
}

/// Iterator over all faces incident to a vertex, in counterclockwise order.
///
/// Created by [VertexHandle::faces](crate::handles::VertexHandle::faces).
pub type VertexFaceIterator<'a> = CircularIterator<'a, StarNextBackFn>;
