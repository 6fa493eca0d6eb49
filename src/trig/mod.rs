// 定数と値型
pub mod common;

// 角度の正規化と戦略
pub mod normalizer;

// Maclaurin級数による sin / cos
pub mod series;

// 正接の計算と結果の分類
pub mod engine;

// 便利な re-export
pub use common::{NormalizedRadian, SERIES_TERMS, TrigPair};
pub use engine::{EvalError, TangentEngine, TangentResult, compute_tangent, format_value};
pub use normalizer::{Strategy, normalize_degrees, normalize_radians};
