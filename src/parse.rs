//! Lenient numeric parsing for free-text form fields.
//!
//! Users type amounts like `"50 000"` (space-grouped) or `"50,5"`
//! (comma as decimal separator). Unparseable text must surface as a
//! validation error, never silently become zero, so the parser
//! returns `f64::NAN` as the not-a-number sentinel; the engine's
//! negated-comparison validation rejects NaN on every field.

/// Parses user input like `"50 000"`, `"50000"` or `"50,5"`.
///
/// Whitespace is stripped, a comma is treated as the decimal
/// separator and the empty string parses to `0`. Anything else that
/// fails to parse as a finite number yields `f64::NAN`.
pub fn parse_number(input: &str) -> f64 {
    let s: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if s.is_empty() {
        return 0.0;
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_grouped_thousands() {
        assert_eq!(parse_number("50 000"), 50000.0);
        assert_eq!(parse_number("  1 234 567  "), 1234567.0);
    }

    #[test]
    fn parses_comma_as_decimal_separator() {
        assert_eq!(parse_number("50,5"), 50.5);
        assert_eq!(parse_number("0,25"), 0.25);
    }

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
    }

    #[test]
    fn garbage_is_nan_not_zero() {
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("1.2.3").is_nan());
    }

    #[test]
    fn non_finite_input_is_nan() {
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(parse_number("160"), 160.0);
        assert_eq!(parse_number("-5"), -5.0);
    }
}
