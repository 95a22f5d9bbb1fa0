//! Textual cell formatting
//!
//! Floats use the shortest representation that parses back to the same
//! value, always with a decimal point or exponent (`1.0`, not `1`), and a
//! signed two-digit exponent (`1e-05`, `1e+16`) as NumPy and pandas print.

/// Format a float cell
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Format a 3-vector as a list cell, `[x, y, z]`
pub fn format_vector(values: &[f64; 3]) -> String {
    format!(
        "[{}, {}, {}]",
        format_float(values[0]),
        format_float(values[1]),
        format_float(values[2])
    )
}
