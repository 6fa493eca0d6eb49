//! # Logging モジュール
//!
//! 電卓のログ管理機能を提供します。
//!
//! 標準出力は対話セッションが使用するため、コンソールへのログは標準エラー出力に
//! 書き込みます。ファイル出力はtracing-appenderの非同期ライタを使い、
//! 計算処理の速度に影響を与えません。
//!
//! ## 設定可能な出力先
//!
//! - `Console`: 標準エラー出力のみ
//! - `File`: ファイルのみ（logs/tancalc.YYYY-MM-DD）
//! - `Both`: 標準エラー出力とファイルの両方

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ログ出力先の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// 標準エラー出力のみ
    #[default]
    Console,
    /// ファイルのみ
    File,
    /// 標準エラー出力とファイルの両方
    Both,
}

impl LogOutput {
    pub fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "stderr" => Ok(LogOutput::Console),
            "file" => Ok(LogOutput::File),
            "both" | "all" => Ok(LogOutput::Both),
            _ => Err(format!("無効な出力先: {}. 利用可能: console, file, both", s)),
        }
    }
}

/// ログ設定構造体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// ログレベル
    pub level: Level,
    /// 出力先
    pub output: LogOutput,
    /// ログファイルのディレクトリ（FileまたはBothの場合）
    pub log_dir: String,
    /// ログファイル名のプレフィックス
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            output: LogOutput::Console,
            log_dir: "logs".to_string(),
            file_prefix: "tancalc".to_string(),
        }
    }
}

/// ログ初期化エラー
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("ログディレクトリを作成できません {path}: {source}")]
    LogDirectory {
        path: String,
        source: std::io::Error,
    },

    #[error("ログシステムの初期化に失敗しました: {0}")]
    Init(String),
}

/// ログシステムを初期化
///
/// ファイル出力を行う場合は非同期ライタのガードを返します。
/// ガードが破棄されると未書き込みのログがフラッシュされるため、
/// 呼び出し側はプロセス終了まで保持してください。
///
/// 環境変数 `RUST_LOG` が設定されていれば設定値より優先されます。
pub fn init_logging(config: LogConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.to_string()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if config.output.writes_file() {
        ensure_log_directory(&config.log_dir).map_err(|source| LoggingError::LogDirectory {
            path: config.log_dir.clone(),
            source,
        })?;
    }

    let console_layer = || {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    };

    match config.output {
        LogOutput::Console => {
            Registry::default()
                .with(env_filter)
                .with(console_layer())
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))?;
            Ok(None)
        }
        LogOutput::File => {
            let file_appender = rolling::daily(&config.log_dir, &config.file_prefix);
            let (non_blocking_appender, guard) = non_blocking(file_appender);

            Registry::default()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(non_blocking_appender)
                        .with_target(true)
                        .with_thread_ids(false)
                        .json(),
                )
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))?;
            Ok(Some(guard))
        }
        LogOutput::Both => {
            let file_appender = rolling::daily(&config.log_dir, &config.file_prefix);
            let (non_blocking_appender, guard) = non_blocking(file_appender);

            Registry::default()
                .with(env_filter)
                .with(console_layer())
                .with(
                    fmt::layer()
                        .with_writer(non_blocking_appender)
                        .with_target(true)
                        .with_thread_ids(false)
                        .json(),
                )
                .try_init()
                .map_err(|e| LoggingError::Init(e.to_string()))?;
            Ok(Some(guard))
        }
    }
}

/// ログレベルを文字列から解析
///
/// # 引数
///
/// * `level_str` - ログレベル文字列 ("trace", "debug", "info", "warn", "error")
pub fn parse_log_level(level_str: &str) -> Result<Level, String> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(format!(
            "無効なログレベル: {}. 利用可能: trace, debug, info, warn, error",
            level_str
        )),
    }
}

/// `-v` の指定回数に応じてログレベルを引き上げる
///
/// 設定値より詳細度が下がることはありません。
pub fn level_for_verbosity(base: Level, verbose: u8) -> Level {
    let requested = match verbose {
        0 => return base,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    base.max(requested)
}

/// ログディレクトリを作成
pub fn ensure_log_directory(log_dir: &str) -> Result<(), std::io::Error> {
    std::fs::create_dir_all(log_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_output_from_str() {
        assert_eq!(LogOutput::from_str("console"), Ok(LogOutput::Console));
        assert_eq!(LogOutput::from_str("file"), Ok(LogOutput::File));
        assert_eq!(LogOutput::from_str("BOTH"), Ok(LogOutput::Both));
        assert!(LogOutput::from_str("invalid").is_err());
        assert!(LogOutput::Both.writes_file());
        assert!(!LogOutput::Console.writes_file());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), Ok(Level::DEBUG));
        assert_eq!(parse_log_level("INFO"), Ok(Level::INFO));
        assert!(parse_log_level("invalid").is_err());
    }

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(Level::WARN, 0), Level::WARN);
        assert_eq!(level_for_verbosity(Level::WARN, 1), Level::INFO);
        assert_eq!(level_for_verbosity(Level::WARN, 2), Level::DEBUG);
        assert_eq!(level_for_verbosity(Level::WARN, 5), Level::TRACE);
        assert_eq!(level_for_verbosity(Level::DEBUG, 1), Level::DEBUG);
    }

    #[test]
    fn test_ensure_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_log_directory(nested.to_str().unwrap()).unwrap();
        assert!(nested.is_dir());
    }
}
