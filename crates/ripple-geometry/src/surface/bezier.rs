//! Tensor-product Bezier height surface.

use ripple_math::{bernstein_row, DVec3, Point3, Vector3};

use super::Surface;
use crate::animate::HeightField;

/// Bezier surface `P(u, v) = (u, v, Z(u, v))` over an animated height field.
///
/// `Z(u, v) = sum_i sum_j h[i, j] * B(u, N, i) * B(v, M, j)`. The partial
/// derivatives are the degree-reduced Bezier surfaces over the first
/// differences of the control vectors `V[i, j] = (i/N, j/M, h[i, j])`,
/// scaled by the reduced degree.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSurface {
    field: HeightField,
}

impl BezierSurface {
    pub fn new(field: HeightField) -> Self {
        Self { field }
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    pub fn degree_u(&self) -> usize {
        self.field.degree_u()
    }

    pub fn degree_v(&self) -> usize {
        self.field.degree_v()
    }

    /// `Z(u, v)`.
    #[allow(clippy::needless_range_loop)]
    pub fn height_at(&self, u: f64, v: f64) -> f64 {
        let (n, m) = (self.degree_u(), self.degree_v());
        let basis_u = bernstein_row(u, n);
        let basis_v = bernstein_row(v, m);

        let mut z = 0.0;
        for i in 0..=n {
            for j in 0..=m {
                z += self.field.height(i, j) * basis_u[i] * basis_v[j];
            }
        }
        z
    }

    /// Control vector `V[i, j]`.
    fn control_vector(&self, i: usize, j: usize) -> Vector3 {
        DVec3::new(
            i as f64 / self.degree_u() as f64,
            j as f64 / self.degree_v() as f64,
            self.field.height(i, j),
        )
    }

    /// `dP/du`: degree `(N-1, M)` surface over u-differences, times `N`.
    #[allow(clippy::needless_range_loop)]
    pub fn du_at(&self, u: f64, v: f64) -> Vector3 {
        let (n, m) = (self.degree_u(), self.degree_v());
        let basis_u = bernstein_row(u, n - 1);
        let basis_v = bernstein_row(v, m);

        let mut result = DVec3::ZERO;
        for i in 0..n {
            for j in 0..=m {
                let delta = self.control_vector(i + 1, j) - self.control_vector(i, j);
                result += delta * (basis_u[i] * basis_v[j]);
            }
        }
        n as f64 * result
    }

    /// `dP/dv`: degree `(N, M-1)` surface over v-differences, times `M`.
    #[allow(clippy::needless_range_loop)]
    pub fn dv_at(&self, u: f64, v: f64) -> Vector3 {
        let (n, m) = (self.degree_u(), self.degree_v());
        let basis_u = bernstein_row(u, n);
        let basis_v = bernstein_row(v, m - 1);

        let mut result = DVec3::ZERO;
        for i in 0..=n {
            for j in 0..m {
                let delta = self.control_vector(i, j + 1) - self.control_vector(i, j);
                result += delta * (basis_u[i] * basis_v[j]);
            }
        }
        m as f64 * result
    }
}

impl Surface for BezierSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        DVec3::new(u, v, self.height_at(u, v))
    }

    fn partials_at(&self, u: f64, v: f64) -> (Vector3, Vector3) {
        (self.du_at(u, v), self.dv_at(u, v))
    }
}
