//! Parametric surfaces over the unit square.

mod bezier;

use ripple_math::{Point3, Vector3};

pub use bezier::BezierSurface;

/// Position and unnormalized normal at one parametric coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSample {
    pub position: Point3,
    pub normal: Vector3,
}

/// Trait for parametric surfaces sampled on `(u, v) in [0, 1]^2`.
pub trait Surface: Send + Sync {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// First partial derivatives `(dP/du, dP/dv)` at `(u, v)`.
    fn partials_at(&self, u: f64, v: f64) -> (Vector3, Vector3);

    /// `dP/du x dP/dv`, not normalized. Zero where the partials are parallel.
    fn raw_normal_at(&self, u: f64, v: f64) -> Vector3 {
        let (du, dv) = self.partials_at(u, v);
        du.cross(dv)
    }

    fn sample_at(&self, u: f64, v: f64) -> SurfaceSample {
        SurfaceSample {
            position: self.point_at(u, v),
            normal: self.raw_normal_at(u, v),
        }
    }
}
