/*
 * coerce.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Numeric coercion for payload values.
 */

use yaml_rust2::Yaml;

/// Convert a payload value to a finite number.
///
/// Integers and reals convert directly; strings go through [`parse_number`].
/// Missing values, `null`, empty strings, booleans, lists and mappings are
/// absent, never zero.
pub fn to_number(value: Option<&Yaml>) -> Option<f64> {
    match value? {
        Yaml::Integer(i) => Some(*i as f64),
        Yaml::Real(s) => parse_number(s),
        Yaml::String(s) => parse_number(s),
        _ => None,
    }
}

/// Parse a textual number, trimming surrounding whitespace.
///
/// Accepts decimal and exponent forms as well as unsigned `0x`, `0o` and
/// `0b` integers. Non-finite results are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(value) = parse_radix(text) {
        return Some(value);
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_radix(text: &str) -> Option<f64> {
    let (digits, radix) = match text.get(..2)? {
        "0x" | "0X" => (&text[2..], 16),
        "0o" | "0O" => (&text[2..], 8),
        "0b" | "0B" => (&text[2..], 2),
        _ => return None,
    };
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &str) -> Yaml {
        Yaml::String(s.to_string())
    }

    #[test]
    fn test_absent_inputs() {
        assert_eq!(to_number(None), None);
        assert_eq!(to_number(Some(&Yaml::Null)), None);
        assert_eq!(to_number(Some(&string(""))), None);
        assert_eq!(to_number(Some(&string("   "))), None);
        assert_eq!(to_number(Some(&string("abc"))), None);
    }

    #[test]
    fn test_numeric_inputs() {
        assert_eq!(to_number(Some(&string("3"))), Some(3.0));
        assert_eq!(to_number(Some(&Yaml::Integer(3))), Some(3.0));
        assert_eq!(to_number(Some(&string("3.5"))), Some(3.5));
        assert_eq!(to_number(Some(&string("-2"))), Some(-2.0));
        assert_eq!(to_number(Some(&Yaml::Real("0.25".to_string()))), Some(0.25));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse_number(" 10 "), Some(10.0));
        assert_eq!(parse_number("\t-75.16\n"), Some(-75.16));
    }

    #[test]
    fn test_exponent_and_radix_forms() {
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("0x1A"), Some(26.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0xZZ"), None);
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("Infinity"), None);
        assert_eq!(to_number(Some(&Yaml::Real(".inf".to_string()))), None);
    }

    #[test]
    fn test_non_scalars_are_absent() {
        assert_eq!(to_number(Some(&Yaml::Boolean(true))), None);
        assert_eq!(to_number(Some(&Yaml::Array(vec![Yaml::Integer(1)]))), None);
    }
}
