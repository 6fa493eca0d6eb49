//! 数値コアで共有する定数と値型

use std::f64::consts::PI;

/// Maclaurin級数で加算する項数（初項を含む）
pub const SERIES_TERMS: u32 = 15;

/// ラジアン領域戦略の特異判定しきい値（級数で求めたcosの絶対値に適用）
pub const RADIAN_COS_EPSILON: f64 = 1e-12;

/// 度領域戦略の特異判定しきい値（90°からの距離、単位は度）
pub const DEGREE_SINGULARITY_EPSILON: f64 = 1e-6;

/// 正規化済みのラジアン値 (-π, π]
///
/// `normalizer` モジュールの関数からのみ生成されます。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct NormalizedRadian(f64);

impl NormalizedRadian {
    pub(crate) fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    /// 区間 (-π, π] に収まっているか
    pub fn is_canonical(self) -> bool {
        self.0 > -PI && self.0 <= PI
    }
}

/// 一回の計算で得られる (sin, cos) の組
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigPair {
    pub sin: f64,
    pub cos: f64,
}

impl TrigPair {
    pub fn is_finite(&self) -> bool {
        self.sin.is_finite() && self.cos.is_finite()
    }
}

/// 数学ユーティリティ関数
pub mod math_utils {
    use super::PI;

    /// 度をラジアンに変換
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * PI / 180.0
    }
}
