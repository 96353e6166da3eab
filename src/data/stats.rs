use std::fmt;

// ---------------------------------------------------------------------------
// Weight summary – the five reported aggregates
// ---------------------------------------------------------------------------

/// Scalar aggregates over one group's weight column.
///
/// `std_dev` is the population standard deviation (divisor N, not N-1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl WeightSummary {
    /// Compute the summary for a non-empty sequence; `None` when empty.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Some(WeightSummary {
            mean,
            median: percentile(values, 50.0),
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

impl fmt::Display for WeightSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{mean: {:.2}, median: {:.2}, std_dev: {:.2}, min: {:.2}, max: {:.2}}}",
            self.mean, self.median, self.std_dev, self.min, self.max
        )
    }
}

// ---------------------------------------------------------------------------
// Percentiles and box-plot geometry
// ---------------------------------------------------------------------------

/// Compute a single percentile using linear interpolation between ranks.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    if values.len() == 1 {
        return values[0];
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = rank - lower as f64;

    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Box-and-whisker geometry for one group: Tukey whiskers at 1.5 x IQR,
/// values beyond the whiskers kept separately as outlier points.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Compute box geometry for a non-empty sequence; `None` when empty.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let q1 = percentile(values, 25.0);
        let median = percentile(values, 50.0);
        let q3 = percentile(values, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        // Whiskers sit on the most extreme data points inside the fences.
        let whisker_low = values
            .iter()
            .cloned()
            .filter(|v| *v >= low_fence)
            .fold(f64::INFINITY, f64::min);
        let whisker_high = values
            .iter()
            .cloned()
            .filter(|v| *v <= high_fence)
            .fold(f64::NEG_INFINITY, f64::max);

        let outliers = values
            .iter()
            .cloned()
            .filter(|v| *v < whisker_low || *v > whisker_high)
            .collect();

        Some(BoxStats {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// One histogram bin: half-open interval `[lo, hi)` (closed for the last bin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Bin `values` into `bin_count` equal-width bins spanning the data range.
///
/// No value is excluded: the range is the data's own min..max, display
/// clipping is left to the plot. A constant sequence collapses into a single
/// unit-width bin around its value.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lo: min - 0.5,
            hi: min + 0.5,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_even_count_sequence() {
        let summary = WeightSummary::compute(&[50.0, 60.0, 70.0, 80.0]).unwrap();
        assert!((summary.mean - 65.0).abs() < 1e-9);
        assert!((summary.median - 65.0).abs() < 1e-9);
        assert_eq!(summary.min, 50.0);
        assert_eq!(summary.max, 80.0);
    }

    #[test]
    fn std_dev_uses_population_divisor() {
        // Variance of [2, 4, 4, 4, 5, 5, 7, 9] with divisor N is exactly 4.
        let summary =
            WeightSummary::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((summary.std_dev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn summary_brackets_mean_and_median() {
        let values = vec![55.2, 61.7, 70.3, 88.9, 94.1, 102.6, 49.8];
        let summary = WeightSummary::compute(&values).unwrap();
        assert!(summary.min <= summary.mean && summary.mean <= summary.max);
        assert!(summary.min <= summary.median && summary.median <= summary.max);
    }

    #[test]
    fn summary_of_empty_sequence_is_none() {
        assert!(WeightSummary::compute(&[]).is_none());
    }

    #[test]
    fn spec_scenario_means() {
        let male = WeightSummary::compute(&[70.0, 80.0, 90.0]).unwrap();
        let female = WeightSummary::compute(&[50.0, 60.0, 70.0]).unwrap();
        assert!((male.mean - 80.0).abs() < 1e-9);
        assert!((female.mean - 60.0).abs() < 1e-9);
        assert!(male.min >= 40.0 && male.max <= 150.0);
        assert!(female.min >= 40.0 && female.max <= 150.0);
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let values: Vec<f64> = (1..=5).map(|x| x as f64).collect();
        assert!((percentile(&values, 50.0) - 3.0).abs() < 1e-9);
        assert!((percentile(&values, 25.0) - 2.0).abs() < 1e-9);
        assert!((percentile(&values, 100.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn box_stats_without_outliers_use_data_extremes() {
        let values = vec![50.0, 55.0, 60.0, 65.0, 70.0];
        let b = BoxStats::compute(&values).unwrap();
        assert_eq!(b.whisker_low, 50.0);
        assert_eq!(b.whisker_high, 70.0);
        assert!(b.outliers.is_empty());
        assert!(b.q1 <= b.median && b.median <= b.q3);
    }

    #[test]
    fn box_stats_flag_far_points_as_outliers() {
        let mut values: Vec<f64> = (60..=80).map(|x| x as f64).collect();
        values.push(200.0);
        let b = BoxStats::compute(&values).unwrap();
        assert_eq!(b.outliers, vec![200.0]);
        assert!(b.whisker_high < 200.0);
    }

    #[test]
    fn histogram_covers_all_values() {
        let values = vec![41.0, 52.5, 63.0, 74.5, 85.0, 149.0];
        let bins = histogram(&values, 30);
        assert_eq!(bins.len(), 30);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());
        assert_eq!(bins.first().unwrap().lo, 41.0);
        assert!((bins.last().unwrap().hi - 149.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_of_constant_data_is_one_bin() {
        let bins = histogram(&[70.0, 70.0, 70.0], 30);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn histogram_of_empty_data_is_empty() {
        assert!(histogram(&[], 30).is_empty());
    }
}
