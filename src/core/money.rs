//! Currency and percentage helpers
//!
//! All amounts are plain `f64` values. Rounding happens at the 0.01 unit,
//! half away from zero.

/// Taka sign used as the currency prefix
pub const CURRENCY_GLYPH: char = '\u{09F3}';

/// Display value for a result that could not be computed
pub const PLACEHOLDER: &str = "\u{09F3} \u{2014}";

/// Amounts smaller than this are shown as exactly zero
const DISPLAY_ZERO_THRESHOLD: f64 = 0.005;

/// Round a value to two decimal places, half away from zero.
///
/// A machine-epsilon nudge keeps values such as `1.005` (stored as
/// `1.00499...`) rounding the way they read.
#[must_use]
pub fn round_to_two(value: f64) -> f64 {
    ((value + f64::EPSILON.copysign(value)) * 100.0).round() / 100.0
}

/// Convert a rounded amount into whole cents.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_cents(value: f64) -> i64 {
    (round_to_two(value) * 100.0).round() as i64
}

/// Round for display, collapsing tiny magnitudes (and `-0.0`) to zero.
#[must_use]
pub fn display_amount(value: f64) -> f64 {
    if value.abs() < DISPLAY_ZERO_THRESHOLD {
        0.0
    } else {
        round_to_two(value)
    }
}

/// Format a currency amount as `৳ 12,345.67`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    format!(
        "{CURRENCY_GLYPH} {}",
        group_thousands(&format!("{:.2}", display_amount(value)))
    )
}

/// Format a plain number with 0 to 2 decimal digits (`3`, `1.5`, `1,200.25`).
#[must_use]
pub fn format_number(value: f64) -> String {
    group_thousands(&trim_decimals(display_amount(value)))
}

/// Format a percentage with 0 to 2 decimal digits (`10`, `12.5`, `33.33`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    format_number(value)
}

/// Render a value for a settings form field: rounded, no trailing zeros.
#[must_use]
pub fn to_input_string(value: f64) -> String {
    trim_decimals(round_to_two(value))
}

fn trim_decimals(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Insert `,` separators into the integer part of a plain decimal string.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = number
        .strip_prefix('-')
        .map_or(("", number), |rest| ("-", rest));
    let (integer, fraction) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
