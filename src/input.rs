//! # 入力解析
//!
//! 対話セッションから受け取った1行を、終了コマンド・角度・不正入力の
//! いずれかに分類します。数値コアには有限の実数だけを渡します。

use thiserror::Error;

/// 終了コマンド（大文字小文字を区別しない）
pub const EXIT_COMMAND: &str = "exit";

/// 入力の解析エラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("入力が空です")]
    Empty,

    #[error("数値として解釈できません: {0:?}")]
    NotANumber(String),

    #[error("有限の数値ではありません: {0}")]
    NonFinite(f64),
}

/// 1行分の入力の分類結果
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// セッションを終了
    Exit,
    /// 角度（度）
    Angle(f64),
    /// 解釈できない入力
    Invalid(InputError),
}

/// 1行を分類
pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case(EXIT_COMMAND) {
        return Command::Exit;
    }
    match parse_angle(trimmed) {
        Ok(degrees) => Command::Angle(degrees),
        Err(e) => Command::Invalid(e),
    }
}

/// 文字列を有限の角度（度）として解析
///
/// 空文字列、数値以外、`NaN`、無限大は拒否します。
pub fn parse_angle(text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    let value: f64 = text
        .parse()
        .map_err(|_| InputError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::NonFinite(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("exit")]
    #[case("EXIT")]
    #[case("  Exit \n")]
    fn test_exit_command(#[case] line: &str) {
        assert_eq!(parse_line(line), Command::Exit);
    }

    #[rstest]
    #[case("45", 45.0)]
    #[case(" -45 ", -45.0)]
    #[case("1e3", 1000.0)]
    #[case("0.5", 0.5)]
    #[case("+90", 90.0)]
    fn test_valid_angles(#[case] line: &str, #[case] expected: f64) {
        assert_eq!(parse_line(line), Command::Angle(expected));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parse_angle(""), Err(InputError::Empty));
        assert_eq!(parse_angle("   "), Err(InputError::Empty));
        assert_eq!(
            parse_angle("abc"),
            Err(InputError::NotANumber("abc".to_string()))
        );
        assert!(matches!(parse_angle("NaN"), Err(InputError::NonFinite(_))));
        assert!(matches!(
            parse_angle("Infinity"),
            Err(InputError::NonFinite(_))
        ));
        assert!(matches!(parse_angle("-inf"), Err(InputError::NonFinite(_))));
        assert!(matches!(parse_line("exit now"), Command::Invalid(_)));
    }
}
