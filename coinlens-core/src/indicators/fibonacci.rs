//! Fibonacci retracement levels between the range high and low.
//!
//! level = high - (high - low) * ratio, for each ratio in `FIBONACCI_RATIOS`.
//! Levels are non-increasing in ratio order. Empty input → all zeros.

use super::stats::high_low;

pub const FIBONACCI_RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

pub fn fibonacci_levels(data: &[f64]) -> [f64; 5] {
    let Some((high, low)) = high_low(data) else {
        return [0.0; 5];
    };
    let range = high - low;
    FIBONACCI_RATIOS.map(|ratio| high - range * ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn levels_between_high_and_low() {
        let levels = fibonacci_levels(&[100.0, 200.0, 150.0]);
        assert_approx(levels[0], 200.0 - 100.0 * 0.236, DEFAULT_EPSILON);
        assert_approx(levels[2], 150.0, DEFAULT_EPSILON);
        assert_approx(levels[4], 200.0 - 100.0 * 0.786, DEFAULT_EPSILON);
    }

    #[test]
    fn levels_non_increasing() {
        let levels = fibonacci_levels(&[3.0, 9.0, 1.0, 4.0]);
        for pair in levels.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn single_point_collapses() {
        assert_eq!(fibonacci_levels(&[42.0]), [42.0; 5]);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(fibonacci_levels(&[]), [0.0; 5]);
    }
}
