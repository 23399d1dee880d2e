/// Fixed-point rendering of a number, e.g. `format_number(3.14159, 2) == "3.14"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Renders a ratio as a percentage, e.g. `0.25` as `25.00%`.
pub fn format_percentage(ratio: f64, decimals: usize) -> String {
    format!("{}%", format_number(ratio * 100.0, decimals))
}
