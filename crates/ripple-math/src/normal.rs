use ripple_core::Tolerance;

use crate::Vector3;

/// Direction used when a surface normal cannot be normalized.
pub const REFERENCE_UP: Vector3 = Vector3::Z;

/// Normalize `v`, falling back to [`REFERENCE_UP`] when its length is below
/// `tolerance.normal` or not finite.
pub fn safe_normalize(v: Vector3, tolerance: Tolerance) -> Vector3 {
    let len = v.length();
    if tolerance.is_degenerate_normal(len) {
        REFERENCE_UP
    } else {
        v / len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_unit_length() {
        let n = safe_normalize(dvec3(3.0, 0.0, 4.0), Tolerance::default());
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n - dvec3(0.6, 0.0, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_zero_vector_falls_back() {
        let n = safe_normalize(Vector3::ZERO, Tolerance::default());
        assert_eq!(n, REFERENCE_UP);
    }

    #[test]
    fn test_nan_falls_back() {
        let n = safe_normalize(dvec3(f64::NAN, 0.0, 1.0), Tolerance::default());
        assert_eq!(n, REFERENCE_UP);
    }
}
