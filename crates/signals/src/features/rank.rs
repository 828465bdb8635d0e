//! Fractional ranking over a whole column.

/// Calculates 1-based ranks, giving tied values their average rank.
pub fn calculate_ranks(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return vec![];
    }

    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().cloned().enumerate().collect();

    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; n];

    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && (indexed[j].1 - indexed[i].1).abs() < f64::EPSILON {
            j += 1;
        }

        // positions i..j hold ranks (i+1)..=j
        let avg_rank = (i + 1..j + 1).map(|r| r as f64).sum::<f64>() / (j - i) as f64;

        for entry in &indexed[i..j] {
            ranks[entry.0] = avg_rank;
        }

        i = j;
    }

    ranks
}

/// Percentile rank (0-100] of every present value among the present values.
///
/// Missing values stay missing and do not count towards the total.
#[must_use]
pub fn percentile_rank(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    let n = present.len() as f64;

    let raw: Vec<f64> = present.iter().map(|(_, v)| *v).collect();
    let ranks = calculate_ranks(&raw);

    let mut out = vec![None; values.len()];
    for ((idx, _), rank) in present.iter().zip(ranks) {
        out[*idx] = Some(rank * 100.0 / n);
    }
    out
}
