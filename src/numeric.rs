/// Divides `numerator` by `denominator`, substituting 0.0 when the
/// denominator is zero or not finite. Every derived rate in this crate goes
/// through here so the zero-substitution policy lives in one place.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    numerator / denominator
}

/// Expresses `part` as a percentage of `whole`. Returns 0.0 when `whole` is 0.
pub fn pct_of(part: f64, whole: f64) -> f64 {
    safe_div(part, whole) * 100.0
}
