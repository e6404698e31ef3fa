//! General utility functions.

use compact_str::{format_compact, CompactString, ToCompactString};

/// Format a number the way the JavaScript `Number#toString` does.
///
/// Integral values print without a fraction, `-0` prints as `0`, and very small or
/// very large magnitudes switch to exponent notation (`1e-7`, `1e+21`).
pub fn format_number(n: f64) -> CompactString {
    if n.is_nan() {
        return CompactString::const_new("NaN");
    }
    if n.is_infinite() {
        return CompactString::const_new(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return CompactString::const_new("0");
    }

    let abs = n.abs();
    if abs >= 1e21 {
        let s = format_compact!("{:e}", n);
        return match s.find('e') {
            Some(i) if !s[i + 1..].starts_with('-') => {
                format_compact!("{}e+{}", &s[..i], &s[i + 1..])
            }
            _ => s,
        };
    }
    if abs < 1e-6 {
        return format_compact!("{:e}", n);
    }
    if n.fract() == 0.0 {
        return (n as i128).to_compact_string();
    }
    n.to_compact_string()
}

/// Coerce a string to a number like the JavaScript `Number()` conversion.
///
/// Surrounding whitespace is ignored and the empty string is `0`.
pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => {
            if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
                return i64::from_str_radix(hex, 16).map_or(f64::NAN, |v| v as f64);
            }
            // Rust accepts "inf"/"nan" spellings that JavaScript does not
            if trimmed.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
                return f64::NAN;
            }
            trimmed.parse().unwrap_or(f64::NAN)
        }
    }
}

/// Check if a name is PascalCase: an ASCII uppercase letter followed by ASCII
/// alphanumerics.
pub fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Check if a tag name looks like a component reference (starts uppercase).
#[inline]
pub fn is_component_like(name: &str) -> bool {
    name.as_bytes().first().is_some_and(u8::is_ascii_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12"), 12.0);
        assert_eq!(parse_number(" 1.5 "), 1.5);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("0x10"), 16.0);
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("inf").is_nan());
    }

    #[test]
    fn test_is_pascal_case() {
        assert!(is_pascal_case("Card"));
        assert!(is_pascal_case("MyCard2"));
        assert!(!is_pascal_case("card"));
        assert!(!is_pascal_case("My-Card"));
        assert!(!is_pascal_case("My_Card"));
        assert!(!is_pascal_case(""));
    }
}
