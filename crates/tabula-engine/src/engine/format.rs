/// Format a number for display and for canonical formula text.
///
/// Output always parses back to the same `f64`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return super::CellError::Arithmetic.to_string();
    }
    if n == 0.0 {
        // also folds -0
        return "0".to_string();
    }
    let magnitude = n.abs();
    if !(1e-5..1e16).contains(&magnitude) {
        format!("{:e}", n)
    } else {
        n.to_string()
    }
}
