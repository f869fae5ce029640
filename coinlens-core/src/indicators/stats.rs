//! Shared numeric helpers for the indicator engine.

/// The last `n` elements of `data` (all of it when shorter).
pub fn tail(data: &[f64], n: usize) -> &[f64] {
    &data[data.len().saturating_sub(n)..]
}

/// Arithmetic mean. Empty input → 0.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation around a given mean (divide by N).
///
/// Two-pass: the caller supplies the mean computed over the same window.
pub fn population_stddev(data: &[f64], mean: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let variance = data
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}

/// `(high, low)` of a slice, or `None` when empty.
pub fn high_low(data: &[f64]) -> Option<(f64, f64)> {
    let first = *data.first()?;
    Some(
        data.iter()
            .fold((first, first), |(hi, lo), &v| (hi.max(v), lo.min(v))),
    )
}

/// Midpoint of the high and low of the last `n` values.
pub fn midpoint(data: &[f64], n: usize) -> Option<f64> {
    high_low(tail(data, n)).map(|(hi, lo)| (hi + lo) / 2.0)
}
