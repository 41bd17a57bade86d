use std::num::{IntErrorKind, ParseIntError};

use serde_json::{Number, Value};

/// Separator used inside list-valued CSV cells
pub const LIST_SEPARATOR: char = ',';

/// Splits a raw cell into a JSON array of strings.
/// Pieces are kept as-is: no trimming, empty and duplicate pieces preserved.
/// An empty cell gives an empty array.
pub fn split_list_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Array(Vec::new());
    }

    Value::Array(
        raw.split(LIST_SEPARATOR)
            .map(|piece| Value::String(piece.to_string()))
            .collect(),
    )
}

/// Parses a raw cell as a base-10 integer, or null when the cell is empty.
/// Surrounding whitespace and a leading sign are accepted. Integers wider
/// than i64 keep their full digits.
pub fn parse_integer_value(raw: &str) -> Result<Value, ParseIntError> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }

    let text = raw.trim();
    match text.parse::<i64>() {
        Ok(num) => Ok(Value::Number(num.into())),
        Err(err)
            if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
        {
            wide_integer(text).ok_or(err)
        }
        Err(err) => Err(err),
    }
}

/// Keeps the exact digits of an integer too wide for i64.
/// Only called on text that already parsed as an overflowing integer.
fn wide_integer(text: &str) -> Option<Value> {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = digits.trim_start_matches('0');

    format!("{sign}{digits}")
        .parse::<Number>()
        .ok()
        .map(Value::Number)
}
