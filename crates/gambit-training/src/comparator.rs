//! Holding fitted models, ranking them, and exporting the winner.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::TrainingError, model::TrainedModel};

/// Metric name to value, as computed on the shared test partition.
pub type Metrics = BTreeMap<String, f64>;

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub name: String,
    pub metrics: Metrics,
}

/// All models of one training run with their metrics, in training order.
///
/// The comparator never reorders its records; ranking happens on demand in
/// [`Self::select_best_model`] and reading the table is free of side
/// effects.
#[derive(Debug)]
pub struct ModelComparator {
    records: Vec<ComparisonRecord>,
    models: Vec<TrainedModel>,
    feature_columns: Vec<String>,
    encodings: BTreeMap<String, Vec<String>>,
    class_labels: Vec<String>,
}

impl ModelComparator {
    pub(crate) fn new(
        feature_columns: Vec<String>,
        encodings: BTreeMap<String, Vec<String>>,
        class_labels: Vec<String>,
    ) -> Self {
        Self {
            records: Vec::new(),
            models: Vec::new(),
            feature_columns,
            encodings,
            class_labels,
        }
    }

    pub(crate) fn push(&mut self, name: String, model: TrainedModel, metrics: Metrics) {
        self.records.push(ComparisonRecord { name, metrics });
        self.models.push(model);
    }

    /// The comparison table, one record per model in training order.
    ///
    /// Idempotent; callable any number of times.
    #[must_use]
    pub fn compare_models(&self) -> Vec<ComparisonRecord> {
        self.records.clone()
    }

    /// Input columns the models were fitted on, in design-matrix order.
    #[must_use]
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    #[must_use]
    pub fn metrics(&self, name: &str) -> Option<&Metrics> {
        self.records
            .iter()
            .find(|record| record.name == name)
            .map(|record| &record.metrics)
    }

    #[must_use]
    pub fn model(&self, name: &str) -> Option<&TrainedModel> {
        self.records
            .iter()
            .position(|record| record.name == name)
            .map(|index| &self.models[index])
    }

    /// The model with the strictly greatest value of `metric`.
    ///
    /// Ties go to the model trained first, keeping selection deterministic.
    /// Fails when the metric is missing from any model's record (or no
    /// model was trained), so a typo cannot silently pick a winner.
    pub fn select_best_model(&self, metric: &str) -> Result<(&str, &Metrics), TrainingError> {
        if self.records.is_empty()
            || self
                .records
                .iter()
                .any(|record| !record.metrics.contains_key(metric))
        {
            return Err(TrainingError::InvalidMetric {
                name: metric.to_owned(),
            });
        }
        let mut best = &self.records[0];
        for record in &self.records[1..] {
            if record.metrics[metric] > best.metrics[metric] {
                best = record;
            }
        }
        Ok((best.name.as_str(), &best.metrics))
    }

    /// Packs a non-baseline model into its persistable bundle.
    ///
    /// Returns `None` for unknown names and for the baseline, which is not
    /// worth persisting - its single class is visible in the comparison
    /// table.
    #[must_use]
    pub fn bundle(&self, name: &str) -> Option<ModelBundle> {
        let index = self.records.iter().position(|record| record.name == name)?;
        let model = &self.models[index];
        if matches!(model, TrainedModel::Baseline(_)) {
            return None;
        }
        Some(ModelBundle {
            name: self.records[index].name.clone(),
            trained_at: Utc::now(),
            feature_columns: self.feature_columns.clone(),
            categorical_encodings: self.encodings.clone(),
            class_labels: self.class_labels.clone(),
            metrics: self.records[index].metrics.clone(),
            model: model.clone(),
        })
    }
}

/// Everything inference needs to reuse a fitted model: the model itself,
/// the exact input columns and categorical encodings that shaped its
/// design matrix, and the class labels its predictions index into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub feature_columns: Vec<String>,
    pub categorical_encodings: BTreeMap<String, Vec<String>>,
    pub class_labels: Vec<String>,
    pub metrics: Metrics,
    pub model: TrainedModel,
}

#[cfg(test)]
mod tests {
    use crate::model::MajorityClassModel;

    use super::*;

    fn baseline_model() -> TrainedModel {
        TrainedModel::Baseline(MajorityClassModel::fit(&[0, 0, 1], 2).unwrap())
    }

    fn metrics(f1: f64, accuracy: f64) -> Metrics {
        let mut metrics = Metrics::new();
        metrics.insert("f1_weighted".to_owned(), f1);
        metrics.insert("accuracy".to_owned(), accuracy);
        metrics
    }

    fn comparator_with(entries: &[(&str, f64, f64)]) -> ModelComparator {
        let mut comparator =
            ModelComparator::new(vec!["rating_diff".to_owned()], BTreeMap::new(), vec![
                "black_win".to_owned(),
                "white_win".to_owned(),
            ]);
        for &(name, f1, accuracy) in entries {
            comparator.push(name.to_owned(), baseline_model(), metrics(f1, accuracy));
        }
        comparator
    }

    #[test]
    fn test_comparison_table_preserves_insertion_order() {
        let comparator = comparator_with(&[("baseline", 0.3, 0.4), ("forest", 0.8, 0.7)]);
        let first = comparator.compare_models();
        let second = comparator.compare_models();
        assert_eq!(first, second);
        assert_eq!(first[0].name, "baseline");
        assert_eq!(first[1].name, "forest");
    }

    #[test]
    fn test_select_best_by_metric() {
        let comparator = comparator_with(&[
            ("baseline", 0.3, 0.9),
            ("forest", 0.8, 0.5),
            ("softmax", 0.6, 0.6),
        ]);
        assert_eq!(comparator.select_best_model("f1_weighted").unwrap().0, "forest");
        assert_eq!(comparator.select_best_model("accuracy").unwrap().0, "baseline");
    }

    #[test]
    fn test_ties_go_to_first_trained() {
        let comparator = comparator_with(&[
            ("first", 0.75, 0.5),
            ("second", 0.75, 0.5),
            ("third", 0.75, 0.5),
        ]);
        assert_eq!(
            comparator.select_best_model("f1_weighted").unwrap().0,
            "first"
        );
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        let comparator = comparator_with(&[("baseline", 0.3, 0.4)]);
        assert!(matches!(
            comparator.select_best_model("auc"),
            Err(TrainingError::InvalidMetric { .. })
        ));
    }

    #[test]
    fn test_empty_comparator_has_no_best() {
        let comparator = comparator_with(&[]);
        assert!(comparator.select_best_model("accuracy").is_err());
    }

    #[test]
    fn test_baseline_has_no_bundle() {
        let comparator = comparator_with(&[("baseline", 0.3, 0.4)]);
        assert!(comparator.bundle("baseline").is_none());
        assert!(comparator.bundle("missing").is_none());
    }
}
