pub use super::handle_defs::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marker trait for [InnerTag] and [PossiblyOuterTag].
///
/// There should be no need to implement this.
pub trait InnerOuterMarker:
    Clone + Copy + PartialEq + Eq + PartialOrd + Ord + std::fmt::Debug + Default + std::hash::Hash
{
}

/// Marker type that signifies that a face is a bounded triangle.
///
/// Used as type parameter for [FixedFaceHandle] and [FaceHandle] to indicate that a face
/// handle cannot possibly reference a half-plane.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct InnerTag;

/// Marker type that signifies that a face can possibly be a half-plane.
///
/// Used as type parameter for [FixedFaceHandle] and [FaceHandle] to indicate that a face
/// handle can possibly reference one of the unbounded faces outside the convex hull.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct PossiblyOuterTag;

impl InnerOuterMarker for InnerTag {}

impl InnerOuterMarker for PossiblyOuterTag {}

/// Fixed handle to a vertex.
///
/// *See also the [handles](crate::handles) module.*
pub type FixedVertexHandle = FixedHandleImpl<VertexTag, InnerTag>;

/// Fixed handle to a face.
///
/// The type parameter is either [InnerTag] or [PossiblyOuterTag], depending on whether the
/// face is known to be a bounded triangle.
///
/// *See also the [handles module](crate::handles)*
pub type FixedFaceHandle<InnerOuter> = FixedHandleImpl<FaceTag, InnerOuter>;

/// Handle to a vertex of a triangulation.
///
/// Use this handle to retrieve the vertex [position](Self::position) or the
/// [faces](Self::faces) around it.
///
/// *See also the [handles module](crate::handles).*
pub type VertexHandle<'a> = DynamicHandleImpl<'a, VertexTag, InnerTag>;

/// Handle to a face of a triangulation.
///
/// Depending on the type parameter, the handle **can refer to a half-plane**:
///
/// * `FaceHandle<'a, PossiblyOuterTag>`: The face may be a bounded triangle or a half-plane.
/// * `FaceHandle<'a, InnerTag>`: The face refers to a bounded triangle.
///
/// `FaceHandle<'a, InnerTag>` implements some additional methods that require a bounded
/// face, e.g. [vertices()](#method.vertices) returns exactly 3 vertices and
/// [z_value()](#method.z_value) cannot fail due to a half-plane.
///
/// Use [as_inner()](#method.as_inner) to convert from a *possibly outer* face to an *inner*
/// face.
///
/// *See also the [handles module](crate::handles) for more general information about handles.*
pub type FaceHandle<'a, InnerOuter> = DynamicHandleImpl<'a, FaceTag, InnerOuter>;
