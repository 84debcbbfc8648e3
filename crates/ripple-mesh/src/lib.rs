//! RippleEngine tessellation: surfaces to GPU-ready triangle streams.

pub mod buffer;
pub mod grid;
pub mod vertex;

pub use buffer::TriangleBuffer;
pub use grid::{GridTessellator, Resolution, SampleTable, QUAD_DI, QUAD_DJ, VERTICES_PER_CELL};
pub use vertex::VertexRecord;
