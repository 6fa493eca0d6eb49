//! # 正接計算エンジン
//!
//! 角度（度）を受け取り、正規化 → 級数評価 → 特異判定 の順に処理して
//! 分類済みの結果 [`TangentResult`] を返します。
//!
//! エンジンは状態を持たない `Copy` 値であり、任意のスレッドから
//! 同期なしで呼び出せます。計算中の想定外の失敗はパニックではなく
//! [`TangentResult::Error`] として返されます。
//!
//! ```rust
//! use tancalc::trig::{TangentEngine, TangentResult};
//!
//! let engine = TangentEngine::default();
//! assert_eq!(engine.compute_tangent(90.0), TangentResult::Undefined);
//! assert_eq!(engine.compute_tangent(45.0).to_string(), "1.000000");
//! ```

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::common::TrigPair;
use super::common::math_utils::deg_to_rad;
use super::normalizer::{Strategy, is_degree_singular, normalize_degrees};
use super::series;

/// 一回の計算結果。必ずいずれか一つのタグを持つ
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TangentResult {
    /// 正接の値
    Value(f64),
    /// cos が0とみなせるため定義されない
    Undefined,
    /// 入力が有限の実数として解釈できない（入力側で判定）
    InvalidInput,
    /// 計算中の想定外の失敗
    Error,
}

impl TangentResult {
    pub fn value(&self) -> Option<f64> {
        match self {
            TangentResult::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for TangentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TangentResult::Value(v) => f.write_str(&format_value(*v)),
            TangentResult::Undefined => f.write_str("UNDEFINED"),
            TangentResult::InvalidInput => f.write_str("INVALID INPUT"),
            TangentResult::Error => f.write_str("ERROR"),
        }
    }
}

/// 値を小数点以下ちょうど6桁で整形
///
/// 0に丸められる負の値が `-0.000000` と表示されないよう符号を落とします。
pub fn format_value(value: f64) -> String {
    let text = format!("{:.6}", value);
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

/// エンジン内部の失敗。`compute_tangent` の外には出ない
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[error("角度が有限の数値ではありません: {0}")]
    NonFiniteAngle(f64),

    #[error("級数評価の結果が有限ではありません: x={radians} (sin={sin}, cos={cos})")]
    NonFiniteSeries { radians: f64, sin: f64, cos: f64 },

    #[error("商が有限ではありません: {sin} / {cos}")]
    NonFiniteQuotient { sin: f64, cos: f64 },
}

/// 正規化・評価・特異判定をまとめるエンジン
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TangentEngine {
    strategy: Strategy,
}

impl TangentEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// 角度（度）の正接を計算
    ///
    /// 戻り値は `Value`、`Undefined`、`Error` のいずれかです。
    /// `Value` が `-0.0` になることはありません。
    pub fn compute_tangent(&self, degrees: f64) -> TangentResult {
        match self.evaluate(degrees) {
            Ok(Some(value)) => {
                trace!(degrees, value, strategy = %self.strategy, "正接を計算");
                TangentResult::Value(value)
            }
            Ok(None) => {
                debug!(degrees, strategy = %self.strategy, "特異点のため未定義");
                TangentResult::Undefined
            }
            Err(e) => {
                warn!(degrees, error = %e, "正接の計算に失敗");
                TangentResult::Error
            }
        }
    }

    /// `Ok(None)` は特異点を表す
    fn evaluate(&self, degrees: f64) -> Result<Option<f64>, EvalError> {
        if !degrees.is_finite() {
            return Err(EvalError::NonFiniteAngle(degrees));
        }

        let pair = match self.strategy {
            Strategy::Radian => {
                let x = self.strategy.normalize(degrees);
                let cos = series::cos(x.radians());
                if cos.abs() < self.strategy.epsilon() {
                    return Ok(None);
                }
                TrigPair {
                    sin: series::sin(x.radians()),
                    cos,
                }
            }
            Strategy::Degree => {
                if is_degree_singular(normalize_degrees(degrees)) {
                    return Ok(None);
                }
                series::sin_cos(self.strategy.normalize(degrees))
            }
        };

        if !pair.is_finite() {
            return Err(EvalError::NonFiniteSeries {
                radians: deg_to_rad(degrees),
                sin: pair.sin,
                cos: pair.cos,
            });
        }

        let quotient = pair.sin / pair.cos;
        if !quotient.is_finite() {
            return Err(EvalError::NonFiniteQuotient {
                sin: pair.sin,
                cos: pair.cos,
            });
        }

        // -0.0 を +0.0 に揃える
        Ok(Some(if quotient == 0.0 { 0.0 } else { quotient }))
    }
}

/// 既定の戦略で正接を計算
pub fn compute_tangent(degrees: f64) -> TangentResult {
    TangentEngine::default().compute_tangent(degrees)
}
