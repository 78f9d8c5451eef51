//! # Formatter
//!
//! Turns computed values back into exact display strings, and decides which
//! values are allowed onto the display at all.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw f64 ──► round_to_precision ──► is_overflow? ──► format_number      │
//! │                                          │                              │
//! │                                          └── yes ──► "Overflow"         │
//! │                                                                         │
//! │  format_number(1234.5000, precision 3, grouping on)                     │
//! │    fixed:    "1234.500"                                                 │
//! │    trimmed:  "1234.5"                                                   │
//! │    grouped:  "1,234.5"                                                  │
//! │                                                                         │
//! │  parse_display("1,234.5") ──► 1234.5   (round trip is stable)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Nearest, ties away from zero (`f64::round`): `0.0005 → 0.001` at 3 places.
//! Both the sequential and the expression engine go through [`commit`], so
//! they can never disagree on what a result looks like.

use crate::error::{CalcError, CalcResult};
use crate::{GROUP_SEPARATOR, MAX_DIGITS};

// =============================================================================
// Format Options
// =============================================================================

/// Display-formatting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Decimal places kept after rounding.
    pub precision: u8,
    /// Insert a separator every three integer digits.
    pub grouping: bool,
    /// Exponential notation past the digit ceiling.
    pub scientific: bool,
}

impl FormatOptions {
    /// Fixed notation, no grouping.
    pub const fn plain(precision: u8) -> Self {
        FormatOptions {
            precision,
            grouping: false,
            scientific: false,
        }
    }
}

// =============================================================================
// Rounding & Overflow
// =============================================================================

/// Rounds to `precision` decimal places, ties away from zero.
///
/// ## Example
/// ```rust
/// use tally_core::format::round_to_precision;
///
/// assert_eq!(round_to_precision(1.0 / 3.0, 3), 0.333);
/// assert_eq!(round_to_precision(2.5, 0), 3.0);
/// assert_eq!(round_to_precision(-2.5, 0), -3.0);
/// ```
pub fn round_to_precision(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(i32::from(precision));
    let scaled = value * factor;
    // Past 2^52 a double has no fractional bits left to round away.
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    scaled.round() / factor
}

const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Number of digits left of the decimal point, `floor(log10(|v|)) + 1`.
///
/// Only meaningful for finite, nonzero values.
pub fn integer_digits(value: f64) -> i32 {
    value.abs().log10().floor() as i32 + 1
}

/// True if the value cannot be shown: non-finite, or more than 12 integer digits.
///
/// ## Example
/// ```rust
/// use tally_core::format::is_overflow;
///
/// assert!(!is_overflow(999_999_999_999.0));
/// assert!(is_overflow(1_000_000_000_000.0));
/// assert!(is_overflow(f64::INFINITY));
/// assert!(!is_overflow(0.0));
/// ```
pub fn is_overflow(value: f64) -> bool {
    if !value.is_finite() {
        return true;
    }
    if value == 0.0 {
        return false;
    }
    integer_digits(value) > MAX_DIGITS as i32
}

/// Rounds a computed value and rejects it if it overflows.
///
/// Every result that reaches the accumulator or the display passes here.
pub fn commit(value: f64, precision: u8) -> CalcResult<f64> {
    let rounded = round_to_precision(value, precision);
    if is_overflow(rounded) {
        return Err(CalcError::Overflow);
    }
    Ok(rounded)
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a value for the display.
///
/// ## Rules
/// - Rounded to `precision`, rendered fixed, trailing zeros and a bare `.` trimmed
/// - `-0` collapses to `0`
/// - With `scientific`, values past 12 integer digits use `precision - 1` mantissa digits
/// - With `grouping`, `,` every three digits of the integer part only
///
/// Scientific output is never grouped.
///
/// ## Example
/// ```rust
/// use tally_core::format::{format_number, FormatOptions};
///
/// assert_eq!(format_number(1.0 / 3.0, FormatOptions::plain(3)), "0.333");
/// assert_eq!(format_number(15.0, FormatOptions::plain(3)), "15");
/// assert_eq!(format_number(-0.0001, FormatOptions::plain(3)), "0");
/// ```
pub fn format_number(value: f64, options: FormatOptions) -> String {
    let rounded = round_to_precision(value, options.precision);

    if options.scientific
        && rounded.is_finite()
        && rounded != 0.0
        && integer_digits(rounded) > MAX_DIGITS as i32
    {
        return format_scientific(rounded, options.precision);
    }

    let fixed = format!("{:.*}", usize::from(options.precision), rounded);
    let trimmed = trim_fraction(&fixed);

    if options.grouping {
        group_integer_part(&trimmed)
    } else {
        trimmed
    }
}

/// `1.23e+12` style, matching what a browser's `toExponential` prints.
fn format_scientific(value: f64, precision: u8) -> String {
    let mantissa_digits = usize::from(precision.saturating_sub(1));
    let rendered = format!("{:.*e}", mantissa_digits, value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => rendered,
    }
}

fn trim_fraction(fixed: &str) -> String {
    if !fixed.contains('.') {
        return collapse_negative_zero(fixed.to_string());
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    collapse_negative_zero(trimmed.to_string())
}

fn collapse_negative_zero(text: String) -> String {
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Inserts [`GROUP_SEPARATOR`] into the integer part of a plain literal.
///
/// ## Example
/// ```rust
/// use tally_core::format::group_integer_part;
///
/// assert_eq!(group_integer_part("1234567.891"), "1,234,567.891");
/// assert_eq!(group_integer_part("-999"), "-999");
/// ```
pub fn group_integer_part(literal: &str) -> String {
    let (sign, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", literal),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Reads a display string back into a number.
///
/// Grouping separators are ignored; exponent notation is accepted. Returns
/// `None` for anything else that is not a finite number (error messages,
/// expressions, a lone `-`).
///
/// ## Example
/// ```rust
/// use tally_core::format::parse_display;
///
/// assert_eq!(parse_display("1,234.5"), Some(1234.5));
/// assert_eq!(parse_display("0."), Some(0.0));
/// assert_eq!(parse_display("1.00e+13"), Some(1.0e13));
/// assert_eq!(parse_display("Overflow"), None);
/// assert_eq!(parse_display("2+3"), None);
/// ```
pub fn parse_display(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|&ch| ch != GROUP_SEPARATOR)
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Counts decimal digits in a literal (sign, point and separators excluded).
pub fn count_digits(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

/// Counts digits after the decimal point, 0 when there is none.
pub fn decimal_places(text: &str) -> usize {
    text.split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped(precision: u8) -> FormatOptions {
        FormatOptions {
            precision,
            grouping: true,
            scientific: false,
        }
    }

    fn scientific(precision: u8) -> FormatOptions {
        FormatOptions {
            precision,
            grouping: false,
            scientific: true,
        }
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_precision(0.125, 2), 0.13);
        assert_eq!(round_to_precision(-0.125, 2), -0.13);
        assert_eq!(round_to_precision(1.2346, 3), 1.235);
        assert_eq!(round_to_precision(999_999_999_999.0, 6), 999_999_999_999.0);
        assert_eq!(round_to_precision(110.00000000000001, 2), 110.0);
    }

    #[test]
    fn test_integer_results_have_no_decimal_point() {
        assert_eq!(format_number(15.0, FormatOptions::plain(3)), "15");
        assert_eq!(format_number(100.0, FormatOptions::plain(2)), "100");
        assert_eq!(format_number(0.0, FormatOptions::plain(6)), "0");
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        assert_eq!(format_number(0.333, FormatOptions::plain(3)), "0.333");
        assert_eq!(format_number(0.3, FormatOptions::plain(3)), "0.3");
        assert_eq!(format_number(2.50, FormatOptions::plain(2)), "2.5");
        assert_eq!(format_number(-1.25, FormatOptions::plain(1)), "-1.3");
    }

    #[test]
    fn test_negative_zero_collapses() {
        assert_eq!(format_number(-0.0, FormatOptions::plain(3)), "0");
        assert_eq!(format_number(-0.0004, FormatOptions::plain(3)), "0");
    }

    #[test]
    fn test_grouping_integer_part_only() {
        assert_eq!(format_number(1234567.0, grouped(3)), "1,234,567");
        assert_eq!(format_number(1234.5678, grouped(4)), "1,234.5678");
        assert_eq!(format_number(-999999.5, grouped(1)), "-999,999.5");
        assert_eq!(format_number(100.0, grouped(3)), "100");
    }

    #[test]
    fn test_scientific_past_digit_ceiling() {
        assert_eq!(format_number(1.0e13, scientific(3)), "1.00e+13");
        assert_eq!(format_number(-2.5e15, scientific(2)), "-2.5e+15");
        assert_eq!(format_number(1.0e13, scientific(1)), "1e+13");
        // Within the ceiling, fixed notation is kept
        assert_eq!(format_number(123456.0, scientific(3)), "123456");
    }

    #[test]
    fn test_scientific_is_not_grouped() {
        let both = FormatOptions {
            precision: 3,
            grouping: true,
            scientific: true,
        };
        assert_eq!(format_number(1.0e13, both), "1.00e+13");
        assert_eq!(format_number(1.0e6, both), "1,000,000");
    }

    #[test]
    fn test_overflow_by_digit_count() {
        assert!(!is_overflow(999_999_999_999.0));
        assert!(!is_overflow(-999_999_999_999.0));
        assert!(is_overflow(1.0e12));
        assert!(is_overflow(-1.0e12));
        assert!(is_overflow(f64::NAN));
        assert!(!is_overflow(0.000_001));
    }

    #[test]
    fn test_commit() {
        assert_eq!(commit(1.0 / 3.0, 3), Ok(0.333));
        assert_eq!(commit(999_999_999_999.0 + 1.0, 3), Err(CalcError::Overflow));
        assert_eq!(commit(f64::INFINITY, 3), Err(CalcError::Overflow));
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("15"), Some(15.0));
        assert_eq!(parse_display("-5"), Some(-5.0));
        assert_eq!(parse_display("1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_display("-"), None);
        assert_eq!(parse_display("Cannot divide by zero"), None);
        assert_eq!(parse_display("inf"), None);
    }

    #[test]
    fn test_format_parse_round_trip_is_stable() {
        let options = [
            FormatOptions::plain(3),
            grouped(2),
            scientific(4),
            FormatOptions {
                precision: 6,
                grouping: true,
                scientific: true,
            },
        ];
        let values = [0.0, 15.0, -0.333, 1234567.891, 999_999_999_999.0, 2.5e14, -7.125];

        for opts in options {
            for value in values {
                let once = format_number(value, opts);
                let parsed = parse_display(&once).unwrap();
                assert_eq!(format_number(parsed, opts), once, "value {value} with {opts:?}");
            }
        }
    }

    #[test]
    fn test_digit_helpers() {
        assert_eq!(count_digits("-1,234.56"), 6);
        assert_eq!(decimal_places("1.2345"), 4);
        assert_eq!(decimal_places("12."), 0);
        assert_eq!(decimal_places("12"), 0);
    }
}
