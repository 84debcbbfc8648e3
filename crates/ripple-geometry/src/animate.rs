//! Per-frame animation of control-point heights.

use ripple_core::{Result, RippleError};

use crate::control::ControlGrid;

/// Animated control heights for one frame, laid out like the [`ControlGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    degree_u: usize,
    degree_v: usize,
    heights: Vec<f64>,
}

impl HeightField {
    /// Wrap row-major heights (`index = j * (N + 1) + i`).
    pub fn from_heights(degree_u: usize, degree_v: usize, heights: Vec<f64>) -> Result<Self> {
        if degree_u == 0 || degree_v == 0 {
            return Err(RippleError::Geometry(
                "height field degree must be at least 1 on both axes".into(),
            ));
        }
        let expected = (degree_u + 1) * (degree_v + 1);
        if heights.len() != expected {
            return Err(RippleError::Geometry(format!(
                "height field of degree ({degree_u}, {degree_v}) needs {expected} values, got {}",
                heights.len()
            )));
        }
        Ok(Self {
            degree_u,
            degree_v,
            heights,
        })
    }

    pub fn degree_u(&self) -> usize {
        self.degree_u
    }

    pub fn degree_v(&self) -> usize {
        self.degree_v
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i <= self.degree_u && j <= self.degree_v).then(|| self.height(i, j))
    }

    /// Height at `(i, j)`. Panics outside the grid.
    #[inline]
    pub(crate) fn height(&self, i: usize, j: usize) -> f64 {
        self.heights[j * (self.degree_u + 1) + i]
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }
}

/// Turns a static control grid into the height field of a given instant.
///
/// `h = base + strength * amplitude * sin(t + phase)`; each height depends on
/// its own control point and the time only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    strength: f64,
}

impl Animator {
    pub const DEFAULT_STRENGTH: f64 = 0.1;

    pub fn new(strength: f64) -> Self {
        Self { strength }
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn animate(&self, grid: &ControlGrid, t_now: f64) -> HeightField {
        let heights = grid
            .points()
            .iter()
            .map(|p| p.base_height + self.strength * p.amplitude * (t_now + p.phase).sin())
            .collect();

        HeightField {
            degree_u: grid.degree_u(),
            degree_v: grid.degree_v(),
            heights,
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STRENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlPoint;
    use approx::assert_abs_diff_eq;
    use ripple_core::ControlRanges;

    #[test]
    fn test_zero_amplitude_keeps_base() {
        let grid = ControlGrid::from_fn(3, 3, |i, j| ControlPoint::fixed((i + j) as f64)).unwrap();
        let field = Animator::default().animate(&grid, 123.4);
        for j in 0..=3 {
            for i in 0..=3 {
                assert_eq!(field.get(i, j), Some((i + j) as f64));
            }
        }
    }

    #[test]
    fn test_formula() {
        let grid = ControlGrid::from_fn(1, 1, |_, _| ControlPoint::new(0.5, 2.0, 1.0)).unwrap();
        let field = Animator::new(0.1).animate(&grid, 0.25);
        let expected = 0.5 + 0.1 * 2.0 * (0.25_f64 + 1.0).sin();
        for &h in field.heights() {
            assert_abs_diff_eq!(h, expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_excursion_bounded_by_strength() {
        let grid = ControlGrid::random(3, 3, &ControlRanges::default(), 9).unwrap();
        let animator = Animator::default();
        for step in 0..50 {
            let field = animator.animate(&grid, step as f64 * 0.37);
            for (h, p) in field.heights().iter().zip(grid.points()) {
                assert!((h - p.base_height).abs() <= animator.strength() * p.amplitude + 1e-12);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let grid = ControlGrid::random(3, 3, &ControlRanges::default(), 1).unwrap();
        let animator = Animator::default();
        let a = animator.animate(&grid, 5.5);
        let b = animator.animate(&grid, 5.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_heights_validates_length() {
        assert!(HeightField::from_heights(3, 3, vec![0.0; 16]).is_ok());
        assert!(HeightField::from_heights(3, 3, vec![0.0; 12]).is_err());
        assert!(HeightField::from_heights(0, 3, vec![0.0; 4]).is_err());
    }
}
