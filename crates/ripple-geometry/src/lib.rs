//! RippleEngine geometry: control grids, animation, and Bezier surfaces.

pub mod animate;
pub mod control;
pub mod surface;

pub use animate::{Animator, HeightField};
pub use control::{ControlGrid, ControlPoint};
pub use surface::{BezierSurface, Surface, SurfaceSample};
