//! # 級数による三角関数評価
//!
//! sin / cos を打ち切りMaclaurin級数で求めます。各項は直前の項に
//! `-x² / ((2n)(2n±1))` を掛けて更新するため、階乗やべき乗を
//! 個別に計算せずに済み、途中でオーバーフローしません。
//!
//! 加算する項数は [`SERIES_TERMS`]（初項を含めて15項）で固定です。
//! 入力は [`normalize_radians`](super::normalizer::normalize_radians) 等で
//! (-π, π] に縮約済みであることを前提とします。

use super::common::{NormalizedRadian, SERIES_TERMS, TrigPair};

/// sin(x) = x - x³/3! + x⁵/5! - ...
pub fn sin(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    for n in 1..SERIES_TERMS {
        let n = f64::from(n);
        term *= -x2 / ((2.0 * n) * (2.0 * n + 1.0));
        sum += term;
    }
    sum
}

/// cos(x) = 1 - x²/2! + x⁴/4! - ...
pub fn cos(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for n in 1..SERIES_TERMS {
        let n = f64::from(n);
        term *= -x2 / ((2.0 * n - 1.0) * (2.0 * n));
        sum += term;
    }
    sum
}

/// 正規化済みの角度について sin と cos を両方評価
pub fn sin_cos(x: NormalizedRadian) -> TrigPair {
    let radians = x.radians();
    TrigPair {
        sin: sin(radians),
        cos: cos(radians),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::normalizer::normalize_radians;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI};

    #[test]
    fn test_known_values() {
        assert_eq!(sin(0.0), 0.0);
        assert_eq!(cos(0.0), 1.0);
        assert_abs_diff_eq!(sin(FRAC_PI_6), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cos(PI / 3.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sin(FRAC_PI_4), cos(FRAC_PI_4), epsilon = 1e-12);
        assert_abs_diff_eq!(sin(FRAC_PI_2), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cos(PI), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cos_vanishes_at_quarter_turn() {
        assert!(cos(FRAC_PI_2).abs() < 1e-12);
        assert!(cos(-FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_matches_std_over_canonical_range() {
        let steps = 2000;
        for i in 0..=steps {
            let x = -PI + (2.0 * PI) * f64::from(i) / f64::from(steps);
            assert_abs_diff_eq!(sin(x), x.sin(), epsilon = 1e-12);
            assert_abs_diff_eq!(cos(x), x.cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parity() {
        for x in [0.1, 0.7, 1.3, 2.2, 3.0] {
            assert_eq!(sin(-x), -sin(x));
            assert_eq!(cos(-x), cos(x));
        }
    }

    #[test]
    fn test_sin_cos_pair() {
        let pair = sin_cos(normalize_radians(FRAC_PI_6));
        assert!(pair.is_finite());
        assert_abs_diff_eq!(pair.sin, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pair.cos, 3f64.sqrt() / 2.0, epsilon = 1e-12);
    }
}
