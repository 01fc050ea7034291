//! Conversion between operand strings and floating point values.
//!
//! Operands are kept as text while the user types. They are only turned into
//! `f64` when an operator commits a computation, and the result is turned back
//! into its canonical text form.

/// Parse an operand string into a number.
///
/// Returns `None` when the text is not a number (for example a lone `"."`).
/// Non-finite results such as `"Infinity"` are accepted so a previous division
/// by zero can keep flowing through later operations.
pub fn parse_operand(operand: &str) -> Option<f64> {
    let value: f64 = operand.trim().parse().ok()?;
    if value.is_nan() { None } else { Some(value) }
}

/// Format a value as its canonical decimal string.
///
/// Integers carry no fractional part, other values use the shortest text that
/// round-trips. Values outside `[1e-6, 1e21)` switch to exponent notation
/// (`1e+21`, `1.5e-7`), and `-0` is shown as `0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", value);
    }

    // `{:e}` yields "1e21" / "1.5e-7"; positive exponents get an explicit sign.
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}
