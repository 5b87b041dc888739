//! Descriptive statistics over raw nanosecond samples.

/// Statistics in nanoseconds, unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub average: f64,
    pub fastest: f64,
    pub slowest: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Summarize samples.
///
/// `median` is the element at `n / 2` of the sorted samples (the upper median
/// for even counts). `std_dev` is the population deviation (divisor `n`).
pub fn summarize(samples: &[u64]) -> Summary {
    if samples.is_empty() {
        return Summary::default();
    }

    let n = samples.len() as f64;
    let total: f64 = samples.iter().map(|&s| s as f64).sum();
    let average = total / n;

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let variance = samples
        .iter()
        .map(|&s| (s as f64 - average).powi(2))
        .sum::<f64>()
        / n;

    Summary {
        total,
        average,
        fastest: sorted[0] as f64,
        slowest: sorted[sorted.len() - 1] as f64,
        median: sorted[sorted.len() / 2] as f64,
        std_dev: variance.sqrt(),
    }
}

/// Round to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_known_samples() {
        let s = summarize(&[4, 1, 3, 2]);
        assert_eq!(s.total, 10.0);
        assert_eq!(s.average, 2.5);
        assert_eq!(s.fastest, 1.0);
        assert_eq!(s.slowest, 4.0);
        // upper median: sorted[4 / 2] == 3
        assert_eq!(s.median, 3.0);
        assert!((s.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn odd_count_median_is_middle() {
        assert_eq!(summarize(&[9, 1, 5]).median, 5.0);
    }

    #[test]
    fn identical_samples_have_zero_deviation() {
        assert_eq!(summarize(&[7, 7, 7, 7, 7]).std_dev, 0.0);
    }

    #[test]
    fn does_not_reorder_input() {
        let samples = vec![3, 1, 2];
        summarize(&samples);
        assert_eq!(samples, vec![3, 1, 2]);
    }

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn rounds_to_three_places() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(0.0004), 0.0);
        assert_eq!(round3(2.0), 2.0);
    }
}
