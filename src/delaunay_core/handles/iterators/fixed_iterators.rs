use std::marker::PhantomData;

use super::super::handle_defs::{DynamicHandleImpl, FixedHandleImpl, MeshElementType};
use super::super::{FaceHandle, FaceTag, FixedFaceHandle, InnerOuterMarker, InnerTag, PossiblyOuterTag};

use crate::delaunay_core::Mesh;

/// Iterates over the fixed handles of all elements of one kind.
pub struct FixedHandleIterator<Type, InnerOuter> {
    range: std::ops::Range<usize>,
    ty: PhantomData<Type>,
    inner_outer: PhantomData<InnerOuter>,
}

impl<Type: Default, InnerOuter: InnerOuterMarker> FixedHandleIterator<Type, InnerOuter> {
    pub(crate) fn new(to: usize) -> Self {
        Self {
            range: 0..to,
            ty: Default::default(),
            inner_outer: Default::default(),
        }
    }
}

impl<Type: Default, InnerOuter: InnerOuterMarker> Iterator
    for FixedHandleIterator<Type, InnerOuter>
{
    type Item = FixedHandleImpl<Type, InnerOuter>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(FixedHandleImpl::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<Type: Default, InnerOuter: InnerOuterMarker> ExactSizeIterator
    for FixedHandleIterator<Type, InnerOuter>
{
}

/// Iterates over the dynamic handles of all elements of one kind.
pub struct DynamicHandleIterator<'a, Type, InnerOuter> {
    fixed_iterator: FixedHandleIterator<Type, InnerOuter>,
    mesh: &'a Mesh,
}

impl<'a, Type, InnerOuter> DynamicHandleIterator<'a, Type, InnerOuter>
where
    Type: MeshElementType,
    InnerOuter: InnerOuterMarker,
{
    pub(crate) fn new(mesh: &'a Mesh) -> Self {
        DynamicHandleIterator {
            fixed_iterator: FixedHandleIterator::new(Type::num_elements(mesh)),
            mesh,
        }
    }
}

impl<'a, Type, InnerOuter> Iterator for DynamicHandleIterator<'a, Type, InnerOuter>
where
    Type: MeshElementType,
    InnerOuter: InnerOuterMarker,
{
    type Item = DynamicHandleImpl<'a, Type, InnerOuter>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fixed_iterator
            .next()
            .map(|handle| DynamicHandleImpl::new(self.mesh, handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fixed_iterator.size_hint()
    }
}

/// Bounded faces are interleaved with half-planes in the face arena, so the inner face
/// iterators need to skip over the latter.
pub struct FixedInnerFaceIterator<'a> {
    fixed_iterator: FixedHandleIterator<FaceTag, PossiblyOuterTag>,
    mesh: &'a Mesh,
}

impl<'a> FixedInnerFaceIterator<'a> {
    pub(crate) fn new(mesh: &'a Mesh) -> Self {
        Self {
            fixed_iterator: FixedHandleIterator::new(mesh.num_faces()),
            mesh,
        }
    }
}

impl<'a> Iterator for FixedInnerFaceIterator<'a> {
    type Item = FixedFaceHandle<InnerTag>;

    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.mesh;
        self.fixed_iterator.find_map(|face| mesh.as_inner(face))
    }
}

/// Iterates over all bounded faces of a triangulation.
pub struct InnerFaceIterator<'a> {
    fixed_iterator: FixedInnerFaceIterator<'a>,
}

impl<'a> InnerFaceIterator<'a> {
    pub(crate) fn new(mesh: &'a Mesh) -> Self {
        Self {
            fixed_iterator: FixedInnerFaceIterator::new(mesh),
        }
    }
}

impl<'a> Iterator for InnerFaceIterator<'a> {
    type Item = FaceHandle<'a, InnerTag>;

    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.fixed_iterator.mesh;
        self.fixed_iterator
            .next()
            .map(|face| FaceHandle::new(mesh, face))
    }
}
