//! Rendering of probabilities in reports.

/// Format a probability for a report.
///
/// Values with magnitude below `0.01` use scientific notation with three fractional digits
/// and a signed, at least two digit exponent (`1.234e-03`). Other values use fixed-point
/// notation with six fractional digits (`0.580000`).
pub fn format_probability(value: f64) -> String {
    if value.abs() >= 0.01 || !value.is_finite() {
        return format!("{:.6}", value);
    }
    // Rust prints `1.234e-3`, so the exponent has to be rewritten.
    let formatted = format!("{:.3e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exponent.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}
