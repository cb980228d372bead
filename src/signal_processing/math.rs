/// Largest absolute sample value (0.0 for an empty slice)
pub fn peak_abs(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |acc, &x| acc.max(x.abs()))
}

/// Root mean square (0.0 for an empty slice)
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|x| x * x).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Convert a linear amplitude ratio to decibels
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.log10()
}
