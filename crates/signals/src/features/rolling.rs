//! Trailing-window statistics.
//!
//! A window covers the current row and up to `window - 1` rows before it.
//! Missing values inside a window are skipped rather than treated as zero.

fn window_values(values: &[Option<f64>], end: usize, window: usize) -> Vec<f64> {
    let start = (end + 1).saturating_sub(window);
    values[start..=end].iter().flatten().copied().collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
fn std_dev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Trailing mean; partial windows at the start of the series are allowed.
#[must_use]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| mean(&window_values(values, i, window)))
        .collect()
}

/// Trailing z-score of each value against its own window.
///
/// Undefined when the value is missing, when the window holds fewer than two
/// observations, or when the window has no spread.
#[must_use]
pub fn rolling_zscore(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(2);
    values
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let current = (*current)?;
            let observed = window_values(values, i, window);
            let mean = mean(&observed)?;
            let std_dev = std_dev(&observed, mean)?;
            if std_dev < f64::EPSILON {
                return None;
            }
            Some((current - mean) / std_dev)
        })
        .collect()
}
