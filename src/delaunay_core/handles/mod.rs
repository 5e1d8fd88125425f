//! Handle types used for referencing vertices and faces of a triangulation.
//!
//! # Fixed and dynamic handles
//!
//! *Fixed* handles ([FixedVertexHandle], [FixedFaceHandle]) are plain indices. They do not
//! borrow the triangulation and can be stored freely. Since the mesh never removes elements,
//! a fixed handle stays valid for the lifetime of its triangulation.
//!
//! *Dynamic* handles ([VertexHandle], [FaceHandle]) borrow the triangulation and give access
//! to the element's position, neighbors and geometry. Use `fix()` to turn a dynamic handle into
//! a fixed one and [Triangulation::vertex](crate::Triangulation::vertex) or
//! [Triangulation::face](crate::Triangulation::face) for the way back.
//!
//! # Inner and outer faces
//!
//! Faces are either bounded triangles or half-planes outside of the convex hull. Face handles
//! are tagged with [InnerTag] if they are known to refer to a bounded face and with
//! [PossiblyOuterTag] otherwise.

mod handle_defs;
mod handle_impls;
pub mod iterators;
mod public_handles;

pub use public_handles::*;
