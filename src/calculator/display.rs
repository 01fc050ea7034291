//! Display formatting for operands.
//!
//! The state machine only deals in raw decimal strings; grouping the integer
//! part into thousands happens here, right before rendering.

/// Format an operand for the calculator screen.
///
/// The integer part is grouped with thousand separators and the decimal part
/// (if any) is passed through unchanged. Text that is not a plain decimal,
/// such as `Infinity` or `1e+21`, is shown as-is. Returns `None` for an empty
/// operand so callers can pick their own placeholder.
pub fn format_operand(operand: Option<&str>) -> Option<String> {
    let operand = operand.filter(|s| !s.is_empty())?;

    let (sign, unsigned) = match operand.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", operand),
    };
    let (integer, decimal) = match unsigned.split_once('.') {
        Some((integer, decimal)) => (integer, Some(decimal)),
        None => (unsigned, None),
    };

    if !integer.chars().all(|c| c.is_ascii_digit()) {
        return Some(operand.to_string());
    }

    let grouped = if integer.is_empty() {
        "0".to_string()
    } else {
        group_thousands(integer)
    };

    Some(match decimal {
        Some(decimal) => format!("{}{}.{}", sign, grouped, decimal),
        None => format!("{}{}", sign, grouped),
    })
}

/// Format the current operand, showing `"0"` when nothing has been entered.
pub fn format_current(operand: Option<&str>) -> String {
    format_operand(operand).unwrap_or_else(|| "0".to_string())
}

/// Insert a `,` between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
