//! Sign convention for point compression
//!
//! The on-chain decompression routine picks the square root flagged by the
//! top bit of the leading byte. A clear bit means the y-coordinate is the
//! "positive" representative under the rules below.

use num_bigint::BigUint;

use crate::types::CurveParams;

/// G1: `y` is positive iff `y <= p - y`.
pub fn is_positive_g1(y: &BigUint, params: &CurveParams) -> bool {
    if y > &params.modulus {
        // p - y would underflow; such a y is never the lower root
        return false;
    }
    y <= &(&params.modulus - y)
}

/// G2: lexicographic on `(y1, y2)` against `p / 2`.
///
/// `y1` decides unless it sits exactly on the midpoint, in which case `y2`
/// does.
pub fn is_positive_g2(y1: &BigUint, y2: &BigUint, params: &CurveParams) -> bool {
    let mid = params.midpoint();
    match y1.cmp(&mid) {
        core::cmp::Ordering::Less => true,
        core::cmp::Ordering::Greater => false,
        core::cmp::Ordering::Equal => y2 < &mid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CurveParams {
        CurveParams::bn254()
    }

    #[test]
    fn test_g1_small_is_positive() {
        let params = params();
        assert!(is_positive_g1(&BigUint::from(0u32), &params));
        assert!(is_positive_g1(&BigUint::from(5u32), &params));
        assert!(!is_positive_g1(&(&params.modulus - 5u32), &params));
    }

    #[test]
    fn test_g1_exactly_one_of_y_and_neg_y() {
        let params = params();
        let p = &params.modulus;
        let mid = params.midpoint();
        let samples = [
            BigUint::from(1u32),
            BigUint::from(2u32),
            mid.clone(),
            &mid + 1u32,
            p - 1u32,
            p / 3u32,
        ];
        for y in samples {
            let neg = p - &y;
            assert_ne!(
                is_positive_g1(&y, &params),
                is_positive_g1(&neg, &params),
                "y = {y}"
            );
        }
    }

    #[test]
    fn test_g1_midpoint_boundary() {
        let params = params();
        let mid = params.midpoint();
        // mid <= p - mid = mid + 1
        assert!(is_positive_g1(&mid, &params));
        assert!(!is_positive_g1(&(&mid + 1u32), &params));
    }

    #[test]
    fn test_g2_first_component_decides() {
        let params = params();
        let mid = params.midpoint();
        let below = &mid - 1u32;
        let above = &mid + 1u32;
        for y2 in [BigUint::from(0u32), mid.clone(), &params.modulus - 1u32] {
            assert!(is_positive_g2(&below, &y2, &params));
            assert!(!is_positive_g2(&above, &y2, &params));
        }
    }

    #[test]
    fn test_g2_tie_break_on_midpoint() {
        let params = params();
        let mid = params.midpoint();
        let small = BigUint::from(3u32);
        let large = &mid + 3u32;
        assert!(is_positive_g2(&mid, &small, &params));
        assert!(!is_positive_g2(&mid, &large, &params));
        // y2 == mid is not strictly below
        assert!(!is_positive_g2(&mid, &mid, &params));
    }
}
