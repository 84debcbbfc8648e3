pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{ControlRanges, SurfaceConfig, ValueRange};
pub use error::{Result, RippleError};
pub use tolerance::Tolerance;
