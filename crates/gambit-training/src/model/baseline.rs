use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Predicts the majority class of its training targets, ignoring features.
///
/// This is the floor every real candidate must beat: its test accuracy is
/// exactly the frequency of the training-majority class in the test
/// partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorityClassModel {
    class: usize,
}

impl MajorityClassModel {
    pub(crate) fn fit(y: &[usize], n_classes: usize) -> Result<Self, FitError> {
        if y.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }
        let mut counts = vec![0_usize; n_classes];
        for &class in y {
            counts[class] += 1;
        }
        // Strict comparison keeps the smallest class index on ties.
        let mut class = 0;
        for (candidate, &count) in counts.iter().enumerate() {
            if count > counts[class] {
                class = candidate;
            }
        }
        Ok(Self { class })
    }

    /// The class this model always predicts.
    #[must_use]
    pub fn class(&self) -> usize {
        self.class
    }

    pub(crate) fn predict(&self, n_rows: usize) -> Vec<usize> {
        vec![self.class; n_rows]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_class_wins() {
        let model = MajorityClassModel::fit(&[0, 1, 1, 2, 1], 3).unwrap();
        assert_eq!(model.class(), 1);
        assert_eq!(model.predict(3), vec![1, 1, 1]);
    }

    #[test]
    fn test_ties_resolve_to_smallest_index() {
        let model = MajorityClassModel::fit(&[2, 0, 2, 0], 3).unwrap();
        assert_eq!(model.class(), 0);
    }

    #[test]
    fn test_empty_targets_fail() {
        assert!(matches!(
            MajorityClassModel::fit(&[], 3),
            Err(FitError::EmptyTrainingSet)
        ));
    }
}
