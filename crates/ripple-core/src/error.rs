use thiserror::Error;

#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Stream capacity exceeded: {required} bytes required, {capacity} bytes allocated")]
    Capacity { required: u64, capacity: u64 },

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RippleError {
    /// Whether the error stems from a misconfiguration that no retry can fix.
    ///
    /// Every `InvalidConfig` counts, including a resolution whose vertex
    /// count does not fit a single draw call.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Capacity { .. } | Self::InvalidConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, RippleError>;
