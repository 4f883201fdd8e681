/// Round a monetary value to whole cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compare two derived monetary values with a half-cent tolerance.
pub fn cents_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}
