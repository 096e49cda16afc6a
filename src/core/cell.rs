//! Raw table cells and the decode rule applied when reading them back
//!
//! Tables store loosely typed cells. Everything read from a table goes
//! through [`decode_cell`] exactly once before it is mapped onto a record.

use std::fmt;

/// A single cell of a table row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell
    Empty,
    /// Boolean cell
    Bool(bool),
    /// Numeric cell
    Number(f64),
    /// Free text cell
    Text(String),
}

/// One table row, in column order
pub type Row = Vec<CellValue>;

/// Decode a raw cell read from storage.
///
/// Rules, in order:
/// 1. booleans, and the exact texts `"TRUE"` / `"FALSE"`, become booleans;
/// 2. non-empty text without a `-` that reads as a finite number becomes a number;
/// 3. everything else is returned unchanged.
pub fn decode_cell(raw: CellValue) -> CellValue {
    match raw {
        CellValue::Text(text) => match text.as_str() {
            "TRUE" => CellValue::Bool(true),
            "FALSE" => CellValue::Bool(false),
            _ => match parse_numeric(&text) {
                Some(number) => CellValue::Number(number),
                None => CellValue::Text(text),
            },
        },
        other => other,
    }
}

/// Numeric-looking text: no hyphen, plain decimal or exponent notation.
fn parse_numeric(text: &str) -> Option<f64> {
    if text.is_empty() || text.contains('-') {
        return None;
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // f64::from_str also takes "inf" and "NaN"
    if trimmed
        .chars()
        .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a number the way a spreadsheet shows it: integral values carry no
/// fractional part.
pub fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

impl CellValue {
    /// True for blank cells and whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering, also used when persisting to text-only backends
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
            CellValue::Number(number) => format_number(*number),
            CellValue::Text(text) => text.clone(),
        }
    }

    /// Integer view; non-numeric cells read as 0
    pub fn to_i64(&self) -> i64 {
        match self {
            CellValue::Number(number) => number.trunc() as i64,
            CellValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| n.trunc() as i64)
                .unwrap_or(0),
            CellValue::Bool(_) | CellValue::Empty => 0,
        }
    }

    /// Boolean view; anything that is not truthy reads as false
    pub fn to_bool(&self) -> bool {
        match self {
            CellValue::Bool(flag) => *flag,
            CellValue::Text(text) => text.trim().eq_ignore_ascii_case("true"),
            CellValue::Number(number) => *number != 0.0,
            CellValue::Empty => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<bool> for CellValue {
    fn from(flag: bool) -> Self {
        CellValue::Bool(flag)
    }
}

impl From<i64> for CellValue {
    fn from(number: i64) -> Self {
        CellValue::Number(number as f64)
    }
}

impl From<u64> for CellValue {
    fn from(number: u64) -> Self {
        CellValue::Number(number as f64)
    }
}
