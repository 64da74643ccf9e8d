//! Numeric field coercion
//!
//! Both parsers read the longest valid prefix and ignore the rest, so a
//! field like `12kg` yields 12 and garbage yields 0. Integers detect their
//! base from the prefix (`0x` hex, leading `0` octal, otherwise decimal)
//! and saturate on overflow.

/// Parse an integer field with base detection
pub fn parse_integer(text: &str) -> i64 {
    let s = text.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            (16, hex)
        } else {
            // "0x" with no hex digits parses as the leading zero
            (8, &s[..1])
        }
    } else if s.starts_with('0') {
        (8, s)
    } else {
        (10, s)
    };

    let mut value: i128 = 0;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = value * i128::from(radix) + i128::from(digit);
        if value > i128::from(i64::MAX) + 1 {
            break;
        }
    }

    let value = if negative { -value } else { value };
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Parse a floating-point field
pub fn parse_double(text: &str) -> f64 {
    let s = text.trim_start();
    if let Ok(value) = s.parse::<f64>() {
        return value;
    }
    let end = float_prefix_len(s.as_bytes());
    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// Length of the longest `[+-]digits[.digits][e[+-]digits]` prefix
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        if mantissa_digits > 0 {
            i = j;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}
