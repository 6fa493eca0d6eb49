//! # 設定ファイル
//!
//! YAML形式の設定ファイルを読み込みます。すべてのセクションは省略可能で、
//! 省略された項目には既定値が使われます。
//!
//! ```yaml
//! engine:
//!   strategy: radian
//! session:
//!   prompt: "Input(Degree): "
//!   show_banner: true
//!   show_metrics: false
//! logging:
//!   level: warn
//!   output: console
//!   log_dir: logs
//!   file_prefix: tancalc
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::{LogConfig, LogOutput, parse_log_level};
use crate::trig::Strategy;

/// 計算エンジン設定
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: Strategy,
}

/// 対話セッション設定
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub prompt: String,
    pub show_banner: bool,
    /// 計算ごとの所要時間を表示するか
    pub show_metrics: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "Input(Degree): ".to_string(),
            show_banner: true,
            show_metrics: false,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub output: LogOutput,
    pub log_dir: String,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let defaults = LogConfig::default();
        Self {
            level: defaults.level.to_string().to_lowercase(),
            output: defaults.output,
            log_dir: defaults.log_dir,
            file_prefix: defaults.file_prefix,
        }
    }
}

/// 完全な設定
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub engine: EngineConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl CalculatorConfig {
    /// YAMLファイルから設定を読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: CalculatorConfig =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;

        Ok(config)
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_log_level(&self.logging.level).map_err(ConfigError::Validation)?;

        if self.logging.output.writes_file() {
            if self.logging.log_dir.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "log_dir must not be empty when writing log files".to_string(),
                ));
            }
            if self.logging.file_prefix.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "file_prefix must not be empty when writing log files".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// ログ初期化用の設定に変換
    pub fn log_config(&self) -> Result<LogConfig, ConfigError> {
        Ok(LogConfig {
            level: parse_log_level(&self.logging.level).map_err(ConfigError::Validation)?,
            output: self.logging.output,
            log_dir: self.logging.log_dir.clone(),
            file_prefix: self.logging.file_prefix.clone(),
        })
    }

    /// 設定の概要を表示
    pub fn print_summary(&self) {
        println!("=== 計算設定 ===");
        println!("正規化戦略: {}", self.engine.strategy);
        println!("特異判定しきい値: {:e}", self.engine.strategy.epsilon());
        println!();

        println!("=== セッション設定 ===");
        println!("プロンプト: {:?}", self.session.prompt);
        println!("バナー表示: {}", self.session.show_banner);
        println!("所要時間表示: {}", self.session.show_metrics);
        println!();

        println!("=== ログ設定 ===");
        println!("レベル: {}", self.logging.level);
        println!("出力先: {:?}", self.logging.output);
        if self.logging.output.writes_file() {
            println!("ファイル: {}/{}.*", self.logging.log_dir, self.logging.file_prefix);
        }
    }
}

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("設定ファイルが見つかりません: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("ファイル読み込みエラー {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML解析エラー {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("設定検証エラー: {0}")]
    Validation(String),
}
