/// Tolerances used by surface evaluation and tessellation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Minimum length of a raw normal before it counts as degenerate
    pub normal: f64,
}

impl Tolerance {
    pub const DEFAULT_NORMAL: f64 = 1e-12;

    pub fn new(normal: f64) -> Self {
        Self { normal }
    }

    /// Check if a vector length is too small to be normalized
    pub fn is_degenerate_normal(self, length: f64) -> bool {
        !(length.is_finite() && length >= self.normal)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NORMAL)
    }
}
