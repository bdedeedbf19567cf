//! Permissive numeric coercion.
//!
//! Form and JSON input is turned into numbers the way a browser's `Number()`
//! does it: nothing is rejected, anything unreadable becomes NaN and flows on.
//! Every numeric input in the crate goes through this module.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Converts user text to a number. Blank input is 0, unreadable input is NaN.
pub fn to_number(input: &str) -> f64 {
    let text = input.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = radix_literal(text) {
        return value;
    }

    // `str::parse` also accepts "inf" and "nan", which are not numbers here.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    // Accumulate in f64 so literals past any integer width stay finite.
    let mut value = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(digit) => value = value * f64::from(radix) + f64::from(digit),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

/// Converts a JSON request value to a number.
pub fn number_from_json(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => to_number(text),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Calories as they count towards totals: NaN and infinities count as 0.
pub fn calories_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Formats a number for display. Whole numbers print without a fraction; very large
/// and very small magnitudes use exponent form such as `1e+21` or `1.5e-7`.
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        exponent_form(value)
    } else {
        value.to_string()
    }
}

fn exponent_form(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Serde default for numeric record fields that are absent.
pub fn nan() -> f64 {
    f64::NAN
}

/// Non-finite numbers are written to JSON as `null`; read them back as NaN.
pub fn nan_when_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
