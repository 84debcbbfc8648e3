//! Control grid of a tensor-product height surface.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ripple_core::traits::Validate;
use ripple_core::{ControlRanges, Result, RippleError, SurfaceConfig};
use serde::{Deserialize, Serialize};

/// One control point: a resting height plus the parameters of its oscillation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub base_height: f64,
    /// Animation strength before damping
    pub amplitude: f64,
    /// Animation offset in radians
    pub phase: f64,
}

impl ControlPoint {
    pub const fn new(base_height: f64, amplitude: f64, phase: f64) -> Self {
        Self {
            base_height,
            amplitude,
            phase,
        }
    }

    /// A point that never moves.
    pub const fn fixed(base_height: f64) -> Self {
        Self::new(base_height, 0.0, 0.0)
    }

    fn is_finite(&self) -> bool {
        self.base_height.is_finite() && self.amplitude.is_finite() && self.phase.is_finite()
    }
}

/// A `(N+1) x (M+1)` grid of control points.
///
/// `(i, j)` addresses column `i` along u (`0..=N`) and row `j` along v
/// (`0..=M`). Storage is row-major with `j` as the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawControlGrid")]
pub struct ControlGrid {
    degree_u: usize,
    degree_v: usize,
    points: Vec<ControlPoint>,
}

/// Unchecked wire form; deserialization goes through [`ControlGrid::new`].
#[derive(Deserialize)]
struct RawControlGrid {
    degree_u: usize,
    degree_v: usize,
    points: Vec<ControlPoint>,
}

impl TryFrom<RawControlGrid> for ControlGrid {
    type Error = RippleError;

    fn try_from(raw: RawControlGrid) -> Result<Self> {
        Self::new(raw.degree_u, raw.degree_v, raw.points)
    }
}

impl ControlGrid {
    /// Build a grid from row-major points, validating the layout.
    pub fn new(degree_u: usize, degree_v: usize, points: Vec<ControlPoint>) -> Result<Self> {
        let grid = Self {
            degree_u,
            degree_v,
            points,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Build a grid by calling `f(i, j)` for every control point.
    pub fn from_fn<F>(degree_u: usize, degree_v: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> ControlPoint,
    {
        let mut points = Vec::with_capacity((degree_u + 1) * (degree_v + 1));
        for j in 0..=degree_v {
            for i in 0..=degree_u {
                points.push(f(i, j));
            }
        }
        Self::new(degree_u, degree_v, points)
    }

    /// A motionless grid with every height at zero.
    pub fn flat(degree_u: usize, degree_v: usize) -> Result<Self> {
        Self::from_fn(degree_u, degree_v, |_, _| ControlPoint::default())
    }

    /// Populate a grid from a seeded generator; the same seed yields the same grid.
    pub fn random(
        degree_u: usize,
        degree_v: usize,
        ranges: &ControlRanges,
        seed: u64,
    ) -> Result<Self> {
        ranges.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Self::from_fn(degree_u, degree_v, |_, _| {
            let phase = rng.gen_range(ranges.phase.min..ranges.phase.max);
            let amplitude = rng.gen_range(ranges.amplitude.min..ranges.amplitude.max);
            let base_height = rng.gen_range(ranges.base_height.min..ranges.base_height.max);
            ControlPoint::new(base_height, amplitude, phase)
        })?;
        log::debug!(
            "generated {}x{} control grid from seed {}",
            degree_u + 1,
            degree_v + 1,
            seed
        );
        Ok(grid)
    }

    /// Randomized grid using the degrees, ranges, and seed of `config`.
    pub fn from_config(config: &SurfaceConfig) -> Result<Self> {
        Self::random(
            config.degree_u,
            config.degree_v,
            &config.control_ranges,
            config.seed,
        )
    }

    pub fn degree_u(&self) -> usize {
        self.degree_u
    }

    pub fn degree_v(&self) -> usize {
        self.degree_v
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat storage index of `(i, j)`, or `None` outside the grid.
    pub fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i <= self.degree_u && j <= self.degree_v).then(|| j * (self.degree_u + 1) + i)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&ControlPoint> {
        self.index(i, j).map(|idx| &self.points[idx])
    }

    /// Points in row-major order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }
}

impl Validate for ControlGrid {
    fn validate(&self) -> Result<()> {
        if self.degree_u == 0 || self.degree_v == 0 {
            return Err(RippleError::Geometry(format!(
                "control grid degree must be at least 1 on both axes, got ({}, {})",
                self.degree_u, self.degree_v
            )));
        }
        let expected = (self.degree_u + 1) * (self.degree_v + 1);
        if self.points.len() != expected {
            return Err(RippleError::Geometry(format!(
                "control grid of degree ({}, {}) needs {} points, got {}",
                self.degree_u,
                self.degree_v,
                expected,
                self.points.len()
            )));
        }
        if let Some(idx) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(RippleError::Geometry(format!(
                "control point {} is not finite",
                idx
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_layout() {
        let grid = ControlGrid::from_fn(3, 2, |i, j| ControlPoint::fixed((10 * j + i) as f64)).unwrap();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(3, 0), Some(3));
        assert_eq!(grid.index(0, 1), Some(4));
        assert_eq!(grid.get(2, 1).unwrap().base_height, 12.0);
        assert_eq!(grid.get(3, 2).unwrap().base_height, 23.0);
    }

    #[test]
    fn test_out_of_range_lookup() {
        let grid = ControlGrid::flat(3, 3).unwrap();
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 4).is_none());
    }

    #[test]
    fn test_wrong_point_count_rejected() {
        let err = ControlGrid::new(3, 3, vec![ControlPoint::default(); 15]).unwrap_err();
        assert!(matches!(err, RippleError::Geometry(_)));
    }

    #[test]
    fn test_deserialize_rejects_short_grid() {
        let json = r#"{"degree_u":3,"degree_v":3,"points":[{"base_height":0.5,"amplitude":1.0,"phase":0.0}]}"#;
        let err = serde_json::from_str::<ControlGrid>(json).unwrap_err();
        assert!(err.to_string().contains("needs 16 points"), "got {err}");
    }

    #[test]
    fn test_serde_round_trip_keeps_grid() {
        let grid = ControlGrid::random(2, 3, &ControlRanges::default(), 5).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: ControlGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_zero_degree_rejected() {
        assert!(ControlGrid::flat(0, 3).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = ControlGrid::from_fn(1, 1, |i, _| {
            if i == 1 {
                ControlPoint::new(0.0, f64::NAN, 0.0)
            } else {
                ControlPoint::default()
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_random_is_seeded() {
        let ranges = ControlRanges::default();
        let a = ControlGrid::random(3, 3, &ranges, 42).unwrap();
        let b = ControlGrid::random(3, 3, &ranges, 42).unwrap();
        let c = ControlGrid::random(3, 3, &ranges, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_respects_ranges() {
        let ranges = ControlRanges::default();
        let grid = ControlGrid::random(3, 3, &ranges, 7).unwrap();
        for p in grid.points() {
            assert!(ranges.base_height.contains(p.base_height), "{p:?}");
            assert!(ranges.amplitude.contains(p.amplitude), "{p:?}");
            assert!(ranges.phase.contains(p.phase), "{p:?}");
        }
    }

    #[test]
    fn test_from_config() {
        let config = SurfaceConfig {
            degree_u: 2,
            degree_v: 4,
            ..SurfaceConfig::default()
        };
        let grid = ControlGrid::from_config(&config).unwrap();
        assert_eq!(grid.degree_u(), 2);
        assert_eq!(grid.degree_v(), 4);
        assert_eq!(grid.len(), config.control_point_count());
    }
}
