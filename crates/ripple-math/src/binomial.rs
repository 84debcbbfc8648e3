/// Binomial coefficient `C(n, i)` with exact integer arithmetic.
///
/// Uses `C(n, i) = prod_{k=1..i} (k + n - i) / k`. After step `k` the
/// accumulator equals `C(n - i + k, k)`, so every division is exact.
/// Returns 0 when `i > n`.
pub fn binomial(n: usize, i: usize) -> u64 {
    if i > n {
        return 0;
    }

    let offset = (n - i) as u64;
    let mut c: u64 = 1;
    for k in 1..=i as u64 {
        c = c * (offset + k) / k;
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 5), 1);
        assert_eq!(binomial(3, 4), 0);
    }

    #[test]
    fn test_pascal_rows() {
        let row3: Vec<u64> = (0..=3).map(|i| binomial(3, i)).collect();
        assert_eq!(row3, vec![1, 3, 3, 1]);

        let row6: Vec<u64> = (0..=6).map(|i| binomial(6, i)).collect();
        assert_eq!(row6, vec![1, 6, 15, 20, 15, 6, 1]);
    }

    #[test]
    fn test_pascal_identity() {
        for n in 1..30 {
            for i in 1..n {
                assert_eq!(
                    binomial(n, i),
                    binomial(n - 1, i - 1) + binomial(n - 1, i),
                    "C({n}, {i})"
                );
            }
        }
    }

    #[test]
    fn test_larger_values_exact() {
        assert_eq!(binomial(20, 10), 184_756);
        assert_eq!(binomial(40, 20), 137_846_528_820);
    }
}
