/// Summary statistics over a sequence of `f64` values.
///
/// Variance and standard deviation are the population forms (divide by `n`),
/// matching how evaluation-trajectory features are defined.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes summary statistics over `values`.
    ///
    /// Returns `None` for an empty sequence; callers decide what an absent
    /// summary degrades to.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gambit_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([2.0, 4.0, 6.0]).unwrap();
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 6.0);
    /// assert_eq!(stats.mean, 4.0);
    /// assert!(DescriptiveStats::new([]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in &values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        let mean = sum / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        Some(Self {
            min,
            max,
            mean,
            variance,
            std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([3.5]).unwrap();
        assert_eq!(stats.min, 3.5);
        assert_eq!(stats.max, 3.5);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_population_variance() {
        // Values 1..=5: mean 3, population variance 2.
        let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.variance, 2.0);
        assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_negative_values() {
        let stats = DescriptiveStats::new([-2.0, 0.0, 2.0]).unwrap();
        assert_eq!(stats.min, -2.0);
        assert_eq!(stats.max, 2.0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn test_empty_is_none() {
        assert!(DescriptiveStats::new(std::iter::empty()).is_none());
    }
}
