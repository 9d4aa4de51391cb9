//! Company history timeline rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Earliest year accepted for a timeline entry.
pub const MIN_YEAR: i64 = 1900;

/// Latest year accepted for a timeline entry.
pub const MAX_YEAR: i64 = 2100;

/// Default badge background color.
pub const DEFAULT_BADGE_COLOR: &str = "#bda191";

/// Default text color.
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

/// Which side of the timeline the entry is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryPosition {
    #[default]
    Left,
    Right,
}

impl HistoryPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryPosition::Left => "left",
            HistoryPosition::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "left" => Ok(HistoryPosition::Left),
            "right" => Ok(HistoryPosition::Right),
            other => Err(CoreError::Validation(format!(
                "잘못된 위치 값입니다: '{other}'. 'left' 또는 'right'만 가능합니다."
            ))),
        }
    }
}

pub fn validate_year(year: i64) -> Result<(), CoreError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "연도는 {MIN_YEAR}년부터 {MAX_YEAR}년 사이여야 합니다. (입력값: {year})"
        )))
    }
}

/// Validate a CSS hex color (`#abc` or `#aabbcc`).
pub fn validate_color(field: &str, color: &str) -> Result<(), CoreError> {
    if HEX_COLOR_RE.is_match(color) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} 값은 #aabbcc 형식의 색상 코드여야 합니다. (입력값: '{color}')"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds() {
        assert!(validate_year(2023).is_ok());
        assert!(validate_year(1899).is_err());
        assert!(validate_year(2101).is_err());
    }

    #[test]
    fn hex_colors() {
        assert!(validate_color("badgeColor", "#bda191").is_ok());
        assert!(validate_color("badgeColor", "#FFF").is_ok());
        assert!(validate_color("badgeColor", "red").is_err());
        assert!(validate_color("badgeColor", "#12345").is_err());
    }

    #[test]
    fn position_parse() {
        assert_eq!(HistoryPosition::parse("right").unwrap(), HistoryPosition::Right);
        assert!(HistoryPosition::parse("center").is_err());
    }
}
