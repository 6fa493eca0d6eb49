//! # Session モジュール
//!
//! 対話的な読み取り・計算・表示のループを提供します。
//!
//! セッションは入力源と出力先を型引数で受け取るため、標準入出力の代わりに
//! メモリ上のバッファを渡してそのままテストできます。
//!
//! ## 1行ごとの処理
//!
//! 1. **分類**: 終了コマンド、角度、不正入力のいずれかに分類
//! 2. **計算**: 角度であれば [`TangentEngine`] で正接を計算し、所要時間を計測
//! 3. **表示**: `Result: <値>`、`INVALID INPUT`、`Goodbye!` のいずれかを出力
//!
//! どの結果になってもセッションは継続し、終了コマンドか入力の終端でのみ終わります。

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::input::{Command, InputError, parse_line};
use crate::trig::{TangentEngine, TangentResult};

pub const BANNER: &str = "=== Tangent Calculator ===";
pub const INSTRUCTIONS: &str = "Enter angle in degrees (or type 'exit' to quit):";
pub const FAREWELL: &str = "Goodbye!";

/// 1行分の処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// 終了コマンド
    Exit,
    /// 角度を計算した
    Evaluated {
        result: TangentResult,
        elapsed: Duration,
    },
    /// 入力を解釈できなかった
    Invalid(InputError),
}

impl LineOutcome {
    /// 計算結果（不正入力は `InvalidInput` として扱う）
    pub fn result(&self) -> Option<TangentResult> {
        match self {
            LineOutcome::Exit => None,
            LineOutcome::Evaluated { result, .. } => Some(*result),
            LineOutcome::Invalid(_) => Some(TangentResult::InvalidInput),
        }
    }

    /// 利用者向けの1行に整形
    pub fn render(&self, show_metrics: bool) -> String {
        match self {
            LineOutcome::Exit => FAREWELL.to_string(),
            LineOutcome::Evaluated { result, elapsed } if show_metrics => format!(
                "Result: {} | Time: {:.6} ms",
                result,
                elapsed.as_secs_f64() * 1000.0
            ),
            LineOutcome::Evaluated { result, .. } => format!("Result: {}", result),
            LineOutcome::Invalid(_) => TangentResult::InvalidInput.to_string(),
        }
    }
}

/// セッション中の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// コアに渡した角度の数
    pub evaluated: u64,
    pub values: u64,
    pub undefined: u64,
    pub invalid: u64,
    pub errors: u64,
}

impl SessionStats {
    fn record(&mut self, outcome: &LineOutcome) {
        match outcome {
            LineOutcome::Exit => {}
            LineOutcome::Invalid(_) => self.invalid += 1,
            LineOutcome::Evaluated { result, .. } => {
                self.evaluated += 1;
                match result {
                    TangentResult::Value(_) => self.values += 1,
                    TangentResult::Undefined => self.undefined += 1,
                    TangentResult::InvalidInput => self.invalid += 1,
                    TangentResult::Error => self.errors += 1,
                }
            }
        }
    }
}

pub struct Session<R, W> {
    engine: TangentEngine,
    config: SessionConfig,
    reader: R,
    writer: W,
    stats: SessionStats,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: TangentEngine, config: SessionConfig, reader: R, writer: W) -> Self {
        Self {
            engine,
            config,
            reader,
            writer,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// 1行を分類・計算し、集計を更新
    pub fn handle_line(&mut self, line: &str) -> LineOutcome {
        let outcome = match parse_line(line) {
            Command::Exit => LineOutcome::Exit,
            Command::Invalid(e) => {
                debug!(input = line.trim(), error = %e, "不正な入力");
                LineOutcome::Invalid(e)
            }
            Command::Angle(degrees) => {
                let started = Instant::now();
                let result = self.engine.compute_tangent(degrees);
                let elapsed = started.elapsed();
                debug!(degrees, %result, elapsed_us = elapsed.as_micros() as u64, "計算完了");
                LineOutcome::Evaluated { result, elapsed }
            }
        };
        self.stats.record(&outcome);
        outcome
    }

    /// 入力の終端か終了コマンドまで対話ループを実行
    pub fn run(&mut self) -> io::Result<SessionStats> {
        info!(strategy = %self.engine.strategy(), "セッション開始");

        if self.config.show_banner {
            writeln!(self.writer, "{}", BANNER)?;
            writeln!(self.writer, "{}", INSTRUCTIONS)?;
        }

        let mut buf = Vec::new();
        loop {
            write!(self.writer, "{}", self.config.prompt)?;
            self.writer.flush()?;

            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                writeln!(self.writer)?;
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let outcome = self.handle_line(&line);
            writeln!(self.writer, "{}", outcome.render(self.config.show_metrics))?;

            if outcome == LineOutcome::Exit {
                break;
            }
        }

        self.writer.flush()?;
        self.log_summary();
        Ok(self.stats)
    }

    /// 引数で与えられた入力を順に計算して出力（非対話モード）
    ///
    /// 終了コマンドに達した時点で残りの入力は処理しません。
    pub fn evaluate_all<'a, I>(&mut self, inputs: I) -> io::Result<SessionStats>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for input in inputs {
            let outcome = self.handle_line(input);
            if outcome == LineOutcome::Exit {
                break;
            }
            writeln!(self.writer, "{}", outcome.render(self.config.show_metrics))?;
        }
        self.writer.flush()?;
        self.log_summary();
        Ok(self.stats)
    }

    fn log_summary(&self) {
        let stats = &self.stats;
        info!(
            evaluated = stats.evaluated,
            values = stats.values,
            undefined = stats.undefined,
            invalid = stats.invalid,
            errors = stats.errors,
            "セッション終了"
        );
    }
}
