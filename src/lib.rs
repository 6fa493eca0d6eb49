//! # tancalc
//!
//! 三角関数ライブラリを使わずに正接を求める対話型電卓です。
//! sin / cos は15項の打ち切りMaclaurin級数で評価します。
//!
//! - [`trig`]: 数値コア（正規化・級数評価・特異判定）
//! - [`input`]: 入力行の分類と角度の解析
//! - [`session`]: 対話ループ
//! - [`config`]: YAML設定ファイル
//! - [`logging`]: tracingによるログ出力

pub mod config;
pub mod input;
pub mod logging;
pub mod session;
pub mod trig;

pub use trig::{TangentEngine, TangentResult, compute_tangent};
