/// Median of the measurements, averaging the two middle values for even lengths.
///
/// Returns 0.0 for an empty slice.
pub fn median(measurements: &[u64]) -> f64 {
    if measurements.is_empty() {
        return 0.0;
    }

    let mut sorted = measurements.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

pub fn mean(measurements: &[u64]) -> f64 {
    if measurements.is_empty() {
        return 0.0;
    }
    let sum: f64 = measurements.iter().map(|&m| m as f64).sum();
    sum / measurements.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn std_dev(measurements: &[u64]) -> f64 {
    if measurements.is_empty() {
        return 0.0;
    }
    let mean = mean(measurements);
    let variance = measurements
        .iter()
        .map(|&m| {
            let diff = m as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / measurements.len() as f64;
    variance.sqrt()
}

/// Summary of the repetitions of one (size, distribution, algorithm) run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementStats {
    /// Bar length
    pub median: f64,
    /// Error whisker half-length
    pub std_dev: f64,
    pub samples: usize,
}

impl MeasurementStats {
    pub fn of(measurements: &[u64]) -> Self {
        Self {
            median: median(measurements),
            std_dev: std_dev(measurements),
            samples: measurements.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec as prop_vec;
    use proptest::prelude::*;

    #[test]
    fn test_even_length_median_and_population_std_dev() {
        let values = [10, 20, 30, 40];
        assert_eq!(median(&values), 25.0);

        let expected = ((225.0 + 25.0 + 25.0 + 225.0) / 4.0_f64).sqrt();
        assert!((std_dev(&values) - expected).abs() < 1e-12);
        assert!((std_dev(&values) - 11.180_339_887).abs() < 1e-6);
    }

    #[test]
    fn test_odd_length_median_is_middle_value() {
        assert_eq!(median(&[7, 1, 3]), 3.0);
        assert_eq!(median(&[42]), 42.0);
    }

    #[test]
    fn test_median_ignores_input_order() {
        assert_eq!(median(&[40, 10, 30, 20]), 25.0);
    }

    #[test]
    fn test_single_value_has_no_spread() {
        let stats = MeasurementStats::of(&[5]);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.samples, 1);
    }

    #[test]
    fn test_empty_measurements() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let values = [u64::MAX, u64::MAX];
        assert_eq!(median(&values), u64::MAX as f64);
    }

    proptest! {
        #[test]
        fn prop_median_is_bounded(values in prop_vec(0u64..1_000_000, 1..50)) {
            let min = *values.iter().min().unwrap() as f64;
            let max = *values.iter().max().unwrap() as f64;
            let m = median(&values);
            prop_assert!(m >= min && m <= max);
            prop_assert!(std_dev(&values) >= 0.0);
        }

        #[test]
        fn prop_constant_values_have_zero_std_dev(v in 0u64..1_000_000, n in 1usize..20) {
            let values = vec![v; n];
            prop_assert_eq!(median(&values), v as f64);
            prop_assert!(std_dev(&values).abs() < 1e-9);
        }
    }
}
