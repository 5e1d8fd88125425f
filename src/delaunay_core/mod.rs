pub mod handles;
mod hint_generator;
mod mesh;
mod mesh_operations;
mod triangulation_ext;

pub(crate) mod math;

pub use handles::iterators;

pub use hint_generator::{HintGenerator, LastUsedFaceHintGenerator};
pub use mesh::Mesh;

pub use triangulation_ext::PositionInTriangulation;
pub(crate) use triangulation_ext::TriangulationExt;
