use std::convert::TryInto;

use super::super::Mesh;
use super::public_handles::InnerOuterMarker;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element kinds stored in a [Mesh] arena. Internal, see [FixedHandleImpl].
pub trait MeshElementType: Sized + Default {
    /// Number of elements of this kind in `mesh`.
    fn num_elements(mesh: &Mesh) -> usize;
}

/// Internal type definition that is only exposed for documentation purposes.
///
/// Rust will currently not generate documentation for type definitions depending
/// `pub(crate)` types, see [#32077](https://github.com/rust-lang/rust/issues/32077).
///
/// Do not use these types. Their removal will not be considered a breaking change.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedHandleImpl<Type, InnerOuter: InnerOuterMarker> {
    index: u32,
    ty: Type,
    inner_outer: InnerOuter,
}

impl<Type, InnerOuter: InnerOuterMarker> std::fmt::Debug for FixedHandleImpl<Type, InnerOuter> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedHandle")
            .field("index", &self.index)
            .finish()
    }
}

impl<Type: Default, InnerOuter: InnerOuterMarker> FixedHandleImpl<Type, InnerOuter> {
    pub(crate) fn new(index: usize) -> Self {
        Self::new_internal(
            index
                .try_into()
                .expect("Index too big - at most 2^32 elements supported"),
        )
    }

    /// Returns the position of the referenced element in its arena.
    ///
    /// Handles are never invalidated: the mesh only ever grows, so indices are stable.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub(crate) fn adjust_inner_outer<TargetInnerOuter: InnerOuterMarker>(
        &self,
    ) -> FixedHandleImpl<Type, TargetInnerOuter> {
        FixedHandleImpl::<_, _>::new_internal(self.index)
    }

    fn new_internal(index: u32) -> Self {
        Self {
            index,
            ty: Type::default(),
            inner_outer: InnerOuter::default(),
        }
    }
}

/// Internal type definition that is only exposed for documentation purposes.
///
/// Rust will currently not generate documentation for type definitions depending
/// `pub(crate)` types, see [#32077](https://github.com/rust-lang/rust/issues/32077).
///
/// Do not use these types. Their removal will not be considered a breaking change.
pub struct DynamicHandleImpl<'a, Type, InnerOuter: InnerOuterMarker> {
    pub(super) mesh: &'a Mesh,
    pub(super) handle: FixedHandleImpl<Type, InnerOuter>,
}

impl<'a, Type: Default, InnerOuter: InnerOuterMarker> DynamicHandleImpl<'a, Type, InnerOuter> {
    #[inline]
    pub(crate) fn new(mesh: &'a Mesh, handle: FixedHandleImpl<Type, InnerOuter>) -> Self {
        Self { mesh, handle }
    }

    pub(in super::super) fn adjust_inner_outer<TargetInnerOuter: InnerOuterMarker>(
        &self,
    ) -> DynamicHandleImpl<'a, Type, TargetInnerOuter> {
        DynamicHandleImpl::new(self.mesh, self.handle.adjust_inner_outer())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
/// Tag type of vertex handles.
pub struct VertexTag;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
/// Tag type of face handles.
pub struct FaceTag;

impl MeshElementType for VertexTag {
    fn num_elements(mesh: &Mesh) -> usize {
        mesh.num_vertices()
    }
}

impl MeshElementType for FaceTag {
    fn num_elements(mesh: &Mesh) -> usize {
        mesh.num_faces()
    }
}
