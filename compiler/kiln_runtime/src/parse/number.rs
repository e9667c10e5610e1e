//! Numeric literal decoding.
//!
//! Decoding is lenient in the way C's `strtol`/`atof` are: digits are read up
//! to the first byte that cannot belong to the number, the rest is ignored,
//! and integers that overflow saturate.

use crate::value::Value;

/// Decode a numeric literal.
///
/// - `0x`, `0b`, `0o` prefixes (after an optional `-`) give an integer in
///   that radix.
/// - Any other literal containing `.` is a float.
/// - Everything else is a decimal integer.
pub fn parse_number(text: &str) -> Value {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let radix = match body.as_bytes() {
        [b'0', b'x' | b'X', ..] => Some(16),
        [b'0', b'b' | b'B', ..] => Some(2),
        [b'0', b'o' | b'O', ..] => Some(8),
        _ => None,
    };

    if let Some(radix) = radix {
        return Value::Any(leading_int(&body[2..], radix, negative));
    }
    if text.contains('.') {
        return Value::Float(leading_float(text));
    }
    Value::Any(leading_int(body, 10, negative))
}

/// Integer from the leading digits of `digits`, saturating on overflow.
fn leading_int(digits: &str, radix: u32, negative: bool) -> i64 {
    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        let digit = i64::from(digit);
        let next = value
            .checked_mul(i64::from(radix))
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) });
        match next {
            Some(v) => value = v,
            None => return if negative { i64::MIN } else { i64::MAX },
        }
    }
    value
}

/// Float from the longest prefix of `text` that reads as one.
fn leading_float(text: &str) -> f64 {
    if let Ok(x) = text.parse::<f64>() {
        return x;
    }
    let candidate_len = text
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .map_or(text.len(), |(at, _)| at);
    (1..=candidate_len)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
        .unwrap_or(0.0)
}
