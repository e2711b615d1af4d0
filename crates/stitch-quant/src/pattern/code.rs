//! Display codes for pattern colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How codes are spelled.
///
/// Codes are numbered from 1 in assignment order (most frequent color first).
/// Every format yields distinct codes for distinct ranks.
///
/// # Example
///
/// ```
/// use stitch_quant::CodeFormat;
///
/// assert_eq!(CodeFormat::Padded.code(0, 12), "01");
/// assert_eq!(CodeFormat::Padded.code(11, 120), "012");
/// assert_eq!(CodeFormat::Numeric.code(11, 120), "12");
/// let prefixed = CodeFormat::Prefixed { prefix: "C".into() };
/// assert_eq!(prefixed.code(2, 3), "C3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFormat {
    /// Zero-padded number, at least two digits wide and wide enough for the
    /// largest code in the pattern ("01", "02", ... or "001" past 99)
    #[default]
    Padded,
    /// Bare number ("1", "2", ...)
    Numeric,
    /// Fixed prefix followed by a bare number ("C1", "C2", ...)
    Prefixed { prefix: String },
}

const MIN_PADDED_WIDTH: usize = 2;

impl CodeFormat {
    /// Code for the color at zero-based `rank` in a pattern of `total` colors.
    pub fn code(&self, rank: usize, total: usize) -> String {
        let number = rank + 1;
        match self {
            CodeFormat::Padded => {
                let width = digits(total.max(number)).max(MIN_PADDED_WIDTH);
                format!("{number:0width$}")
            }
            CodeFormat::Numeric => number.to_string(),
            CodeFormat::Prefixed { prefix } => format!("{prefix}{number}"),
        }
    }
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Error for an unrecognised code format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown code format '{0}' (expected padded, numeric or prefix:<text>)")]
pub struct ParseCodeFormatError(pub String);

impl FromStr for CodeFormat {
    type Err = ParseCodeFormatError;

    /// Accepts `padded`, `numeric` and `prefix:<text>` (case-insensitive names).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((name, prefix)) = trimmed.split_once(':') {
            if name.eq_ignore_ascii_case("prefix") && !prefix.is_empty() {
                return Ok(CodeFormat::Prefixed {
                    prefix: prefix.to_string(),
                });
            }
            return Err(ParseCodeFormatError(s.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "padded" => Ok(CodeFormat::Padded),
            "numeric" => Ok(CodeFormat::Numeric),
            _ => Err(ParseCodeFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeFormat::Padded => f.write_str("padded"),
            CodeFormat::Numeric => f.write_str("numeric"),
            CodeFormat::Prefixed { prefix } => write!(f, "prefix:{prefix}"),
        }
    }
}
