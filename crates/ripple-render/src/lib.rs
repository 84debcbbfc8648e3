//! RippleEngine frame loop: rebuild the animated surface and stream it into
//! fixed-size vertex storage every frame.

pub mod clock;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod state;
pub mod stream;
pub mod uniforms;
pub mod upload;

pub use clock::{FixedStepClock, MonotonicClock, TimeSource};
#[cfg(feature = "gpu")]
pub use gpu::{surface_primitive_state, surface_vertex_layout, GpuStreamBuffer};
pub use state::{CameraMode, Fog, InputEvent, SceneState, Shading};
pub use stream::{FrameReport, FrameStats, SurfaceStream};
pub use uniforms::{reference_placement, SurfaceUniforms};
pub use upload::{DrawCall, HostBuffer, StreamTarget, StreamingUploader};
