//! Integer-exponent power over any type with a multiplicative identity.

use num::One;

/// Raise `base` to `exp` by iterative binary exponentiation.
///
/// `exp == 0` yields the multiplicative identity for every base, `0^0`
/// included, which keeps the boundary Bernstein terms finite at `t = 0` and
/// `t = 1`.
pub fn powi<T>(base: T, exp: u32) -> T
where
    T: One + Copy,
{
    let mut result = T::one();
    let mut factor = base;
    let mut remaining = exp;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result * factor;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = factor * factor;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_exponent_is_identity() {
        assert_eq!(powi(0.0_f64, 0), 1.0);
        assert_eq!(powi(7.5_f64, 0), 1.0);
        assert_eq!(powi(0_i64, 0), 1);
    }

    #[test]
    fn test_first_power_is_base() {
        assert_eq!(powi(0.25_f64, 1), 0.25);
        assert_eq!(powi(-3_i64, 1), -3);
    }

    #[test]
    fn test_integer_powers_exact() {
        assert_eq!(powi(2_u64, 10), 1024);
        assert_eq!(powi(3_i64, 5), 243);
        assert_eq!(powi(-2_i64, 3), -8);
        assert_eq!(powi(10_u64, 19), 10_000_000_000_000_000_000);
    }

    #[test]
    fn test_float_powers() {
        assert_eq!(powi(0.5_f64, 3), 0.125);
        assert_eq!(powi(0.0_f32, 4), 0.0);
        let x = 1.1_f64;
        assert!((powi(x, 7) - x.powi(7)).abs() < 1e-12);
    }
}
