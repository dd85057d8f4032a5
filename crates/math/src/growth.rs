//! Growth-rate helpers.

/// Mean of period-on-period growth rates over the last `lookback` points.
///
/// Pairs whose starting value is zero are skipped. Returns `None` when the
/// window yields no usable pair (fewer than two points).
///
/// # Arguments
/// * `values` - Observations in time order
/// * `lookback` - Number of trailing points to use
#[must_use]
pub fn average_growth_rate(values: &[f64], lookback: usize) -> Option<f64> {
    let start = values.len().saturating_sub(lookback);
    let window = &values[start..];

    let rates: Vec<f64> = window
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .filter(|rate| rate.is_finite())
        .collect();

    if rates.is_empty() {
        return None;
    }
    Some(rates.iter().sum::<f64>() / rates.len() as f64)
}

/// Compound `value` forward by `rate` for `periods` periods.
#[must_use]
pub fn compound(value: f64, rate: f64, periods: i32) -> f64 {
    value * (1.0 + rate).powi(periods)
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
