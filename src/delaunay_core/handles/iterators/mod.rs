mod circular_iterator;
mod fixed_iterators;
mod hull_iterator;

pub use circular_iterator::{CircularIterator, NextBackFn, StarNextBackFn, VertexFaceIterator};
pub use fixed_iterators::{
    DynamicHandleIterator, FixedHandleIterator, FixedInnerFaceIterator, InnerFaceIterator,
};
pub use hull_iterator::{HullIterator, HullNextBackFn};

use super::{FaceTag, InnerTag, PossiblyOuterTag, VertexTag};

/// An iterator over all vertices of a triangulation.
pub type VertexIterator<'a> = DynamicHandleIterator<'a, VertexTag, InnerTag>;

/// An iterator over the fixed handles of all vertices.
pub type FixedVertexIterator = FixedHandleIterator<VertexTag, InnerTag>;

/// An iterator over all faces, including the half-planes outside the convex hull.
pub type FaceIterator<'a> = DynamicHandleIterator<'a, FaceTag, PossiblyOuterTag>;

/// An iterator over the fixed handles of all faces, including half-planes.
pub type FixedFaceIterator = FixedHandleIterator<FaceTag, PossiblyOuterTag>;
