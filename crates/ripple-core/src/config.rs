//! Surface engine configuration.
//!
//! Every field has a default matching the reference scene, so a JSON file only
//! needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RippleError};
use crate::tolerance::Tolerance;
use crate::traits::Validate;

/// Half-open sampling range `[min, max)` for one control-point attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// Reject ranges that are empty or not finite; `name` labels the error.
    pub fn check(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(RippleError::InvalidConfig(format!(
                "{name} range must be finite and non-empty, got [{}, {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Ranges used to populate a randomized control grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlRanges {
    pub base_height: ValueRange,
    pub amplitude: ValueRange,
    pub phase: ValueRange,
}

impl Validate for ControlRanges {
    fn validate(&self) -> Result<()> {
        self.base_height.check("base height")?;
        self.amplitude.check("amplitude")?;
        self.phase.check("phase")
    }
}

impl Default for ControlRanges {
    fn default() -> Self {
        Self {
            base_height: ValueRange::new(0.0, 1.0),
            amplitude: ValueRange::new(0.0, 3.0),
            phase: ValueRange::new(0.0, 6.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface degree along u (`N`)
    pub degree_u: usize,
    /// Surface degree along v (`M`)
    pub degree_v: usize,
    /// Parametric samples along u, both ends included
    pub u_samples: usize,
    /// Parametric samples along v, both ends included
    pub v_samples: usize,
    /// Damping applied to every control point's animation amplitude
    pub animation_strength: f64,
    /// Constant per-vertex color
    pub surface_color: [f32; 3],
    /// Seed for the randomized control grid
    pub seed: u64,
    pub control_ranges: ControlRanges,
    /// Evaluate samples and cells on the rayon pool
    pub parallel: bool,
    /// Frame time above which the pipeline logs a warning, in milliseconds
    pub frame_budget_ms: f64,
    pub tolerance: Tolerance,
}

impl SurfaceConfig {
    pub const DEFAULT_DEGREE: usize = 3;
    pub const DEFAULT_SAMPLES: usize = 50;
    pub const DEFAULT_ANIMATION_STRENGTH: f64 = 0.1;
    pub const DEFAULT_COLOR: [f32; 3] = [0.4, 0.3, 0.6];
    pub const DEFAULT_FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;
    /// One minute.
    pub const MAX_FRAME_BUDGET_MS: f64 = 60_000.0;

    /// Parse a JSON document and validate the result.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded surface config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of control points in the grid, `(N+1)(M+1)`.
    pub fn control_point_count(&self) -> usize {
        (self.degree_u + 1) * (self.degree_v + 1)
    }

    /// Number of vertices emitted per frame, `(u-1)(v-1)*6`.
    pub fn vertex_count(&self) -> usize {
        self.u_samples.saturating_sub(1) * self.v_samples.saturating_sub(1) * 6
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            degree_u: Self::DEFAULT_DEGREE,
            degree_v: Self::DEFAULT_DEGREE,
            u_samples: Self::DEFAULT_SAMPLES,
            v_samples: Self::DEFAULT_SAMPLES,
            animation_strength: Self::DEFAULT_ANIMATION_STRENGTH,
            surface_color: Self::DEFAULT_COLOR,
            seed: 0,
            control_ranges: ControlRanges::default(),
            parallel: true,
            frame_budget_ms: Self::DEFAULT_FRAME_BUDGET_MS,
            tolerance: Tolerance::default(),
        }
    }
}

impl Validate for SurfaceConfig {
    fn validate(&self) -> Result<()> {
        if self.degree_u == 0 || self.degree_v == 0 {
            return Err(RippleError::InvalidConfig(format!(
                "surface degree must be at least 1 on both axes, got ({}, {})",
                self.degree_u, self.degree_v
            )));
        }
        if self.u_samples < 2 || self.v_samples < 2 {
            return Err(RippleError::InvalidConfig(format!(
                "resolution must be at least 2x2, got {}x{}",
                self.u_samples, self.v_samples
            )));
        }
        if !self.animation_strength.is_finite() {
            return Err(RippleError::InvalidConfig(
                "animation strength must be finite".into(),
            ));
        }
        if self.surface_color.iter().any(|c| !c.is_finite()) {
            return Err(RippleError::InvalidConfig(
                "surface color must be finite".into(),
            ));
        }
        if !(self.frame_budget_ms > 0.0 && self.frame_budget_ms <= Self::MAX_FRAME_BUDGET_MS) {
            return Err(RippleError::InvalidConfig(format!(
                "frame budget must be in (0, {}] ms, got {}",
                Self::MAX_FRAME_BUDGET_MS,
                self.frame_budget_ms
            )));
        }
        self.control_ranges.validate()
    }
}
