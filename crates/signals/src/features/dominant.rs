//! Average position size per trader and the side holding the largest one.

/// Commitment divided by trader count, or 0 when either is missing or the
/// count is zero.
#[must_use]
pub fn avg_per_trader(commitment: Option<f64>, traders: Option<f64>) -> f64 {
    match (commitment, traders) {
        (Some(c), Some(t)) if t != 0.0 => c / t,
        _ => 0.0,
    }
}

/// Category whose traders hold the largest average position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DominantSide {
    ComLong,
    ComShort,
    NonComLong,
    NonComShort,
    Neutral,
}

impl DominantSide {
    /// Picks the largest average, in the order commercial long, commercial
    /// short, non-commercial long, non-commercial short. The first wins a
    /// tie; all zeros is [`DominantSide::Neutral`].
    #[must_use]
    pub fn from_averages(
        com_long: f64,
        com_short: f64,
        noncom_long: f64,
        noncom_short: f64,
    ) -> Self {
        let candidates = [
            (DominantSide::ComLong, com_long),
            (DominantSide::ComShort, com_short),
            (DominantSide::NonComLong, noncom_long),
            (DominantSide::NonComShort, noncom_short),
        ];
        if candidates.iter().all(|(_, v)| *v == 0.0) {
            return DominantSide::Neutral;
        }

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}

impl std::fmt::Display for DominantSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DominantSide::ComLong => "COM_LONG",
            DominantSide::ComShort => "COM_SHORT",
            DominantSide::NonComLong => "NONCOM_LONG",
            DominantSide::NonComShort => "NONCOM_SHORT",
            DominantSide::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_missing_traders_give_zero() {
        assert_eq!(avg_per_trader(Some(1_000.0), Some(0.0)), 0.0);
        assert_eq!(avg_per_trader(Some(1_000.0), None), 0.0);
        assert_eq!(avg_per_trader(None, Some(10.0)), 0.0);
        assert_eq!(avg_per_trader(None, None), 0.0);
    }

    #[test]
    fn average_divides_commitment() {
        assert!((avg_per_trader(Some(66_048.0), Some(32.0)) - 2_064.0).abs() < f64::EPSILON);
    }

    #[test]
    fn largest_average_dominates() {
        assert_eq!(
            DominantSide::from_averages(10.0, 40.0, 30.0, 5.0),
            DominantSide::ComShort
        );
        assert_eq!(
            DominantSide::from_averages(1.0, 2.0, 3.0, 4.0),
            DominantSide::NonComShort
        );
    }

    #[test]
    fn ties_resolve_to_first_category() {
        assert_eq!(
            DominantSide::from_averages(0.0, 7.0, 7.0, 0.0),
            DominantSide::ComShort
        );
    }

    #[test]
    fn all_zero_is_neutral() {
        assert_eq!(
            DominantSide::from_averages(0.0, 0.0, 0.0, 0.0),
            DominantSide::Neutral
        );
        assert_eq!(DominantSide::Neutral.to_string(), "NEUTRAL");
    }
}
