// Descriptive statistics for a numeric sample
//
// Sample (n-1) variance and linearly interpolated percentiles over the
// sorted sample.

use super::{Result, StatsError};
use serde::{Deserialize, Serialize};

/// Summary of a numeric sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    /// Sample standard deviation (sqrt of `variance`)
    pub std: f64,
    /// Sample variance, n-1 divisor
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
}

/// Compute descriptive statistics for `values`
///
/// An empty sample yields the all-zero record; check `count == 0` before
/// trusting the fields, or use [`try_descriptive_stats`].
///
/// # Example
/// ```
/// use comparo::statistics::descriptive_stats;
///
/// let stats = descriptive_stats(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(stats.mean, 2.5);
/// assert_eq!(stats.median, 2.5);
/// assert_eq!(stats.q25, 1.75);
/// ```
pub fn descriptive_stats(values: &[f64]) -> DescriptiveStats {
    try_descriptive_stats(values).unwrap_or_default()
}

/// Like [`descriptive_stats`] but reports an empty sample as an error
pub fn try_descriptive_stats(values: &[f64]) -> Result<DescriptiveStats> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }

    let n = values.len();
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Ok(DescriptiveStats {
        mean,
        std: variance.sqrt(),
        variance,
        min: sorted[0],
        max: sorted[n - 1],
        count: n,
        median: percentile(&sorted, 0.5),
        q25: percentile(&sorted, 0.25),
        q75: percentile(&sorted, 0.75),
    })
}

/// Percentile `p` (in [0, 1]) of an already sorted sample
///
/// Interpolates between `sorted[floor((n-1)*p)]` and `sorted[ceil((n-1)*p)]`.
/// Returns 0.0 for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_zero_filled() {
        let stats = descriptive_stats(&[]);
        assert_eq!(stats, DescriptiveStats::default());
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_try_empty_sample_errors() {
        assert_eq!(try_descriptive_stats(&[]), Err(StatsError::EmptySample));
    }

    #[test]
    fn test_single_value() {
        let stats = descriptive_stats(&[7.0]);
        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.q25, 7.0);
        assert_eq!(stats.q75, 7.0);
    }

    #[test]
    fn test_sample_variance_uses_n_minus_one() {
        // mean=5, squared deviations sum to 20, 20/3
        let stats = descriptive_stats(&[2.0, 4.0, 6.0, 8.0]);
        assert!((stats.variance - 20.0 / 3.0).abs() < 1e-12);
        assert!((stats.std - (20.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_unsorted_input() {
        let stats = descriptive_stats(&[9.0, 1.0, 5.0, 3.0, 7.0]);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.q25, 3.0);
        assert_eq!(stats.q75, 7.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        // index = 3 * 0.5 = 1.5
        assert_eq!(percentile(&sorted, 0.5), 25.0);
        // index = 3 * 0.25 = 0.75
        assert_eq!(percentile(&sorted, 0.25), 17.5);
        assert_eq!(percentile(&sorted, 1.0), 40.0);
        assert_eq!(percentile(&[], 0.5), 0.0);
    }
}
