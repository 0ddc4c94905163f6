/// Computes the arithmetic mean of a slice of values. Returns NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation as `sqrt(n·Σx² − (Σx)²) / n`.
/// Returns NaN for empty input.
pub fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let (sum, squared_sum) = values
        .iter()
        .fold((0.0, 0.0), |(s, sq), v| (s + v, sq + v * v));

    // cancellation can leave a tiny negative radicand for identical scores
    let radicand = (n * squared_sum - sum * sum).max(0.0);
    radicand.sqrt() / n
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
