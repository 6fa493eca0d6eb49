//! # 角度正規化
//!
//! 級数評価の前に任意の有限角度を1周期分の代表値へ縮約します。
//! Maclaurin級数は |x| が大きいほど打ち切り誤差が増えるため、
//! 15項で十分な精度を得るには (-π, π] への縮約が前提になります。
//!
//! 縮約の方法は2通りあり、[`Strategy`] で選択します。
//!
//! - `Radian`: 度をラジアンに変換してから 2π を法として縮約
//! - `Degree`: 度のまま 360 を法として (-180, 180] に縮約してから変換

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::math_utils::deg_to_rad;
use super::common::{DEGREE_SINGULARITY_EPSILON, NormalizedRadian, RADIAN_COS_EPSILON};

/// 正規化と特異判定の戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// ラジアン領域で縮約し、級数で求めた |cos| < 1e-12 を特異とみなす
    #[default]
    Radian,
    /// 度領域で縮約し、90°からの距離が 1e-6 度未満を特異とみなす
    Degree,
}

impl Strategy {
    /// 度で与えられた角度を正規化済みラジアンに変換
    ///
    /// 度での剰余は丸め誤差なしに求まるため、どちらの戦略も
    /// 先に 360 を法として縮約してからラジアンに変換する。
    pub fn normalize(self, degrees: f64) -> NormalizedRadian {
        match self {
            Strategy::Radian => normalize_radians(deg_to_rad(degrees % 360.0)),
            Strategy::Degree => {
                let reduced = normalize_degrees(degrees);
                NormalizedRadian::new(deg_to_rad(reduced).min(PI))
            }
        }
    }

    /// この戦略が用いる特異判定しきい値
    pub fn epsilon(self) -> f64 {
        match self {
            Strategy::Radian => RADIAN_COS_EPSILON,
            Strategy::Degree => DEGREE_SINGULARITY_EPSILON,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Radian => "radian",
            Strategy::Degree => "degree",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "radian" | "radians" | "rad" => Ok(Strategy::Radian),
            "degree" | "degrees" | "deg" => Ok(Strategy::Degree),
            _ => Err(format!("無効な戦略: {}. 利用可能: radian, degree", s)),
        }
    }
}

/// 角度（度）を (-180, 180] に正規化
pub fn normalize_degrees(degrees: f64) -> f64 {
    let mut reduced = degrees % 360.0;
    if reduced > 180.0 {
        reduced -= 360.0;
    }
    if reduced <= -180.0 {
        reduced += 360.0;
    }
    reduced
}

/// ラジアン値を (-π, π] に正規化
pub fn normalize_radians(radians: f64) -> NormalizedRadian {
    let mut reduced = radians % TAU;
    if reduced > PI {
        reduced -= TAU;
    }
    if reduced <= -PI {
        reduced += TAU;
    }
    let normalized = NormalizedRadian::new(reduced);
    debug_assert!(!radians.is_finite() || normalized.is_canonical());
    normalized
}

/// 度領域の特異判定: 縮約済み角度が ±90° に十分近いか
pub fn is_degree_singular(reduced_degrees: f64) -> bool {
    let folded = (reduced_degrees % 180.0).abs();
    (folded - 90.0).abs() < DEGREE_SINGULARITY_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(45.0, 45.0)]
    #[case(450.0, 90.0)]
    #[case(-270.0, 90.0)]
    #[case(-180.0, 180.0)]
    #[case(540.0, 180.0)]
    #[case(720.0, 0.0)]
    #[case(-30.0, -30.0)]
    #[case(315.0, -45.0)]
    #[case(-1110.0, -30.0)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(normalize_degrees(input), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_degrees_huge_input_stays_bounded() {
        let reduced = normalize_degrees(1.0e20);
        assert!(reduced > -180.0 && reduced <= 180.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(-3.0)]
    #[case(7.5)]
    #[case(-100.0)]
    #[case(12345.678)]
    fn test_normalize_radians_in_range(#[case] input: f64) {
        let reduced = normalize_radians(input);
        assert!(reduced.is_canonical(), "{} -> {}", input, reduced.radians());
        // 同じ角度を表していること
        let turns = (input - reduced.radians()) / TAU;
        assert_abs_diff_eq!(turns, turns.round(), epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_radians_boundaries() {
        assert_abs_diff_eq!(normalize_radians(PI).radians(), PI);
        assert_abs_diff_eq!(normalize_radians(-PI).radians(), PI);
        assert_abs_diff_eq!(
            normalize_radians(deg_to_rad(270.0)).radians(),
            -PI / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_radian_strategy_reduces_degrees_exactly() {
        for k in [1.0e4, 1.0e6, 1.0e9, 1.0e12] {
            let x = Strategy::Radian.normalize(90.0 + 360.0 * k);
            assert_eq!(x.radians(), Strategy::Radian.normalize(90.0).radians());
            let y = Strategy::Radian.normalize(45.0 - 360.0 * k);
            assert_eq!(y.radians(), Strategy::Radian.normalize(45.0).radians());
        }
        assert!(Strategy::Radian.normalize(f64::MAX).is_canonical());
        assert!(Strategy::Radian.normalize(1.0e306).is_canonical());
    }

    #[test]
    fn test_strategies_agree_on_ordinary_angles() {
        for degrees in [-725.0, -135.0, -10.0, 0.0, 30.0, 200.0, 1000.0] {
            let a = Strategy::Radian.normalize(degrees).radians();
            let b = Strategy::Degree.normalize(degrees).radians();
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[rstest]
    #[case(90.0, true)]
    #[case(-90.0, true)]
    #[case(90.0000001, true)]
    #[case(90.001, false)]
    #[case(0.0, false)]
    #[case(180.0, false)]
    #[case(45.0, false)]
    fn test_is_degree_singular(#[case] reduced: f64, #[case] expected: bool) {
        assert_eq!(is_degree_singular(reduced), expected);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(Strategy::from_str("radian"), Ok(Strategy::Radian));
        assert_eq!(Strategy::from_str("DEG"), Ok(Strategy::Degree));
        assert!(Strategy::from_str("gradian").is_err());
        assert_eq!(Strategy::default(), Strategy::Radian);
        assert_eq!(Strategy::Degree.to_string(), "degree");
    }
}
