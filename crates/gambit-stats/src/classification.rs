//! Confusion-matrix based classification metrics.
//!
//! Metrics are computed from (actual, predicted) class-index pairs. Weighted
//! averages weight each class by its support (number of actual occurrences),
//! so empty classes contribute nothing. All divisions are guarded: a class
//! that is never predicted has precision 0, never NaN.

/// Confusion matrix over `n_classes` classes.
///
/// Rows index the actual class, columns the predicted class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    n_classes: usize,
    counts: Vec<usize>,
    total: usize,
}

impl ConfusionMatrix {
    /// Builds a confusion matrix from parallel actual/predicted slices.
    ///
    /// # Panics
    ///
    /// Panics if the slices differ in length or contain a class index
    /// `>= n_classes`.
    #[must_use]
    pub fn from_pairs(n_classes: usize, actual: &[usize], predicted: &[usize]) -> Self {
        assert_eq!(
            actual.len(),
            predicted.len(),
            "actual and predicted must be the same length"
        );
        let mut counts = vec![0_usize; n_classes * n_classes];
        for (&a, &p) in actual.iter().zip(predicted) {
            assert!(a < n_classes && p < n_classes, "class index out of range");
            counts[a * n_classes + p] += 1;
        }
        Self {
            n_classes,
            counts,
            total: actual.len(),
        }
    }

    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of samples whose actual class is `class`.
    #[must_use]
    pub fn support(&self, class: usize) -> usize {
        (0..self.n_classes)
            .map(|p| self.counts[class * self.n_classes + p])
            .sum()
    }

    /// Fraction of samples predicted correctly; 0 for an empty matrix.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.n_classes)
            .map(|c| self.counts[c * self.n_classes + c])
            .sum();
        ratio(correct, self.total)
    }

    /// Precision of `class`: correct predictions over all predictions of it.
    #[must_use]
    pub fn precision(&self, class: usize) -> f64 {
        let predicted: usize = (0..self.n_classes)
            .map(|a| self.counts[a * self.n_classes + class])
            .sum();
        ratio(self.counts[class * self.n_classes + class], predicted)
    }

    /// Recall of `class`: correct predictions over its support.
    #[must_use]
    pub fn recall(&self, class: usize) -> f64 {
        ratio(
            self.counts[class * self.n_classes + class],
            self.support(class),
        )
    }

    /// Harmonic mean of precision and recall for `class`.
    #[must_use]
    pub fn f1(&self, class: usize) -> f64 {
        let p = self.precision(class);
        let r = self.recall(class);
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }

    /// Support-weighted average precision across classes.
    #[must_use]
    pub fn weighted_precision(&self) -> f64 {
        self.weighted(Self::precision)
    }

    /// Support-weighted average recall across classes.
    #[must_use]
    pub fn weighted_recall(&self) -> f64 {
        self.weighted(Self::recall)
    }

    /// Support-weighted average F1 across classes.
    #[must_use]
    pub fn weighted_f1(&self) -> f64 {
        self.weighted(Self::f1)
    }

    #[expect(clippy::cast_precision_loss)]
    fn weighted(&self, metric: impl Fn(&Self, usize) -> f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (0..self.n_classes)
            .map(|c| metric(self, c) * self.support(c) as f64)
            .sum::<f64>()
            / self.total as f64
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
