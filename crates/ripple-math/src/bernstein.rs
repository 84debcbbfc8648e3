//! Univariate Bernstein polynomials.

use smallvec::SmallVec;

use crate::binomial::binomial;
use crate::power::powi;

/// Basis values `B(t, n, 0..=n)` for one parameter, stored inline for small degrees.
pub type BasisRow = SmallVec<[f64; 8]>;

/// Evaluate `B(t, n, i) = C(n, i) * t^i * (1 - t)^(n - i)`.
///
/// `t` is expected in `[0, 1]`. Returns 0 for `i > n`.
pub fn bernstein(t: f64, n: usize, i: usize) -> f64 {
    if i > n {
        return 0.0;
    }
    binomial(n, i) as f64 * powi(t, i as u32) * powi(1.0 - t, (n - i) as u32)
}

/// Evaluate all `n + 1` basis functions of degree `n` at `t`.
pub fn bernstein_row(t: f64, n: usize) -> BasisRow {
    (0..=n).map(|i| bernstein(t, n, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_partition_of_unity() {
        for n in 0..=10 {
            for step in 0..=20 {
                let t = step as f64 / 20.0;
                let sum: f64 = bernstein_row(t, n).iter().sum();
                assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_boundary_values() {
        // Only the first basis function survives at t = 0, only the last at t = 1.
        for n in 0..=6 {
            for i in 0..=n {
                let expected_at_0 = if i == 0 { 1.0 } else { 0.0 };
                let expected_at_1 = if i == n { 1.0 } else { 0.0 };
                assert_eq!(bernstein(0.0, n, i), expected_at_0, "B(0, {n}, {i})");
                assert_eq!(bernstein(1.0, n, i), expected_at_1, "B(1, {n}, {i})");
            }
        }
    }

    #[test]
    fn test_cubic_midpoint() {
        let row = bernstein_row(0.5, 3);
        assert_eq!(row.len(), 4);
        assert_abs_diff_eq!(row[0], 0.125, epsilon = 1e-15);
        assert_abs_diff_eq!(row[1], 0.375, epsilon = 1e-15);
        assert_abs_diff_eq!(row[2], 0.375, epsilon = 1e-15);
        assert_abs_diff_eq!(row[3], 0.125, epsilon = 1e-15);
    }

    #[test]
    fn test_symmetry() {
        let t = 0.3;
        for i in 0..=4 {
            assert_abs_diff_eq!(
                bernstein(t, 4, i),
                bernstein(1.0 - t, 4, 4 - i),
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_index_above_degree_is_zero() {
        assert_eq!(bernstein(0.5, 2, 3), 0.0);
    }
}
