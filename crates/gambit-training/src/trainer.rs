//! Fitting and scoring all candidates of one training run.

use std::thread;

use gambit_features::FeatureTable;
use gambit_stats::ConfusionMatrix;

use crate::{
    comparator::{Metrics, ModelComparator},
    dataset::Dataset,
    error::{FitError, TrainingError},
    model::{Hyperparams, ModelKind, TrainedModel},
};

pub const METRIC_ACCURACY: &str = "accuracy";
pub const METRIC_F1_WEIGHTED: &str = "f1_weighted";
pub const METRIC_PRECISION_WEIGHTED: &str = "precision_weighted";
pub const METRIC_RECALL_WEIGHTED: &str = "recall_weighted";

/// Trains the configured candidates against one shared feature table.
///
/// The seed is fixed at construction; together with the input data it
/// determines the split and every candidate's randomness, so repeated runs
/// reproduce identical comparators.
#[derive(Debug, Clone)]
pub struct ModelTrainer {
    seed: u64,
    candidates: Vec<ModelKind>,
}

impl ModelTrainer {
    /// Creates a trainer for the given candidate kinds.
    ///
    /// Duplicates are dropped (first occurrence wins) and the baseline is
    /// always trained first whether or not it is listed.
    pub fn new(seed: u64, candidates: impl IntoIterator<Item = ModelKind>) -> Self {
        let mut deduped = Vec::new();
        for kind in candidates {
            if !deduped.contains(&kind) {
                deduped.push(kind);
            }
        }
        Self {
            seed,
            candidates: deduped,
        }
    }

    /// Fits every candidate on one split and scores them on the identical
    /// test partition.
    ///
    /// `parallel` chooses one training task per candidate on scoped threads;
    /// sequential mode runs the same tasks in a loop. Both modes produce the
    /// same models and metrics, and the comparator lists candidates in
    /// launch order either way. Any candidate failure fails the run.
    pub fn train_and_compare_models(
        &self,
        table: &FeatureTable,
        target_column: &str,
        test_fraction: f64,
        params: &Hyperparams,
        parallel: bool,
    ) -> Result<ModelComparator, TrainingError> {
        let dataset = Dataset::from_table(table, target_column)?;
        let (train, test) = dataset.train_test_split(test_fraction, self.seed)?;
        log::info!(
            "split {} rows into {} train / {} test",
            dataset.n_rows(),
            train.n_rows(),
            test.n_rows()
        );

        let mut kinds = vec![ModelKind::Baseline];
        for kind in &self.candidates {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }

        // The task is defined once; the parallel flag only picks the
        // executor that runs it.
        let fit_candidate =
            |kind: ModelKind| TrainedModel::fit(kind, &train, params, self.candidate_seed(kind));
        let mut outcomes: Vec<Option<Result<TrainedModel, FitError>>> =
            kinds.iter().map(|_| None).collect();
        if parallel {
            log::info!("fitting {} candidates in parallel", kinds.len());
            thread::scope(|scope| {
                let fit_candidate = &fit_candidate;
                for (slot, &kind) in outcomes.iter_mut().zip(&kinds) {
                    scope.spawn(move || *slot = Some(fit_candidate(kind)));
                }
            });
        } else {
            log::info!("fitting {} candidates sequentially", kinds.len());
            for (slot, &kind) in outcomes.iter_mut().zip(&kinds) {
                *slot = Some(fit_candidate(kind));
            }
        }

        let mut comparator = ModelComparator::new(
            dataset.feature_columns.clone(),
            dataset.encodings.clone(),
            dataset.class_labels.clone(),
        );
        for (&kind, outcome) in kinds.iter().zip(outcomes) {
            let model = outcome
                .expect("every launched task stores its outcome")
                .map_err(|source| TrainingError::Candidate {
                    model: kind.to_string(),
                    source,
                })?;
            // Every candidate is scored on the identical held-out rows.
            let predictions = model.predict(&test.x);
            let matrix = ConfusionMatrix::from_pairs(dataset.n_classes(), &test.y, &predictions);
            let metrics = collect_metrics(&matrix);
            log::info!(
                "{kind}: accuracy {:.4}, weighted f1 {:.4}",
                metrics[METRIC_ACCURACY],
                metrics[METRIC_F1_WEIGHTED]
            );
            comparator.push(kind.to_string(), model, metrics);
        }
        Ok(comparator)
    }

    /// Per-candidate seed keyed by model identity, not launch position:
    /// reordering candidates cannot change any individual model's result.
    fn candidate_seed(&self, kind: ModelKind) -> u64 {
        self.seed ^ kind.seed_stream().wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

fn collect_metrics(matrix: &ConfusionMatrix) -> Metrics {
    let mut metrics = Metrics::new();
    metrics.insert(METRIC_ACCURACY.to_owned(), matrix.accuracy());
    metrics.insert(METRIC_F1_WEIGHTED.to_owned(), matrix.weighted_f1());
    metrics.insert(
        METRIC_PRECISION_WEIGHTED.to_owned(),
        matrix.weighted_precision(),
    );
    metrics.insert(METRIC_RECALL_WEIGHTED.to_owned(), matrix.weighted_recall());
    metrics
}

#[cfg(test)]
mod tests {
    use gambit_features::{Column, FeatureVector, TimeControlClass};

    use super::*;

    /// Deterministic table whose label follows the rating difference, with
    /// mild structure in the evaluation fields.
    fn sample_table(n: usize) -> FeatureTable {
        #[expect(clippy::cast_precision_loss)]
        let vectors: Vec<FeatureVector> = (0..n)
            .map(|i| {
                let diff = ((i % 21) as f64).mul_add(40.0, -400.0);
                let drift = ((i % 7) as f64 - 3.0) / 10.0;
                FeatureVector {
                    white_rating: 1500.0 + diff / 2.0,
                    black_rating: 1500.0 - diff / 2.0,
                    rating_diff: diff,
                    avg_rating: 1500.0,
                    num_moves: 10 + i % 10,
                    eval_mean: diff / 800.0 + drift,
                    eval_std: 0.2 + drift.abs(),
                    eval_max: diff / 400.0 + 0.5,
                    eval_min: diff / 400.0 - 0.5,
                    eval_final: diff / 400.0 + drift,
                    eval_trend: diff / 400.0,
                    time_control: match i % 3 {
                        0 => TimeControlClass::Blitz,
                        1 => TimeControlClass::Rapid,
                        _ => TimeControlClass::Classical,
                    },
                    opening: format!("Opening {}", i % 4),
                }
            })
            .collect();
        #[expect(clippy::cast_precision_loss)]
        let labels = (0..n)
            .map(|i| {
                let diff = ((i % 21) as f64).mul_add(40.0, -400.0);
                if diff > 50.0 {
                    "white_win".to_owned()
                } else if diff < -50.0 {
                    "black_win".to_owned()
                } else {
                    "draw".to_owned()
                }
            })
            .collect();
        let mut table = FeatureTable::from_vectors(&vectors);
        table
            .push_column("result", Column::Categorical(labels))
            .unwrap();
        table
    }

    fn all_candidates() -> Vec<ModelKind> {
        vec![
            ModelKind::LogisticRegression,
            ModelKind::RandomForest,
            ModelKind::BoostedTrees,
        ]
    }

    fn small_params() -> Hyperparams {
        Hyperparams {
            n_estimators: 12,
            max_depth: 4,
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree_exactly() {
        let table = sample_table(80);
        let trainer = ModelTrainer::new(42, all_candidates());
        let parallel = trainer
            .train_and_compare_models(&table, "result", 0.25, &small_params(), true)
            .unwrap();
        let sequential = trainer
            .train_and_compare_models(&table, "result", 0.25, &small_params(), false)
            .unwrap();
        assert_eq!(parallel.compare_models(), sequential.compare_models());
        assert_eq!(
            parallel.select_best_model(METRIC_F1_WEIGHTED).unwrap().0,
            sequential.select_best_model(METRIC_F1_WEIGHTED).unwrap().0
        );
    }

    #[test]
    fn test_baseline_is_always_first() {
        let table = sample_table(40);
        let trainer = ModelTrainer::new(1, vec![ModelKind::RandomForest]);
        let comparator = trainer
            .train_and_compare_models(&table, "result", 0.2, &small_params(), false)
            .unwrap();
        let records = comparator.compare_models();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "baseline");
        assert_eq!(records[1].name, "random_forest");
    }

    #[test]
    fn test_baseline_accuracy_is_majority_frequency() {
        let table = sample_table(60);
        let seed = 7;
        let trainer = ModelTrainer::new(seed, vec![]);
        let comparator = trainer
            .train_and_compare_models(&table, "result", 0.2, &small_params(), false)
            .unwrap();

        // Rebuild the identical split and compute the expected floor.
        let dataset = Dataset::from_table(&table, "result").unwrap();
        let (train, test) = dataset.train_test_split(0.2, seed).unwrap();
        let mut counts = vec![0_usize; dataset.n_classes()];
        for &class in train.targets() {
            counts[class] += 1;
        }
        let mut majority = 0;
        for (class, &count) in counts.iter().enumerate() {
            if count > counts[majority] {
                majority = class;
            }
        }
        let hits = test.targets().iter().filter(|&&c| c == majority).count();
        #[expect(clippy::cast_precision_loss)]
        let expected = hits as f64 / test.n_rows() as f64;

        let metrics = comparator.metrics("baseline").unwrap();
        assert_eq!(metrics[METRIC_ACCURACY], expected);
    }

    #[test]
    fn test_metrics_do_not_depend_on_candidate_order() {
        let table = sample_table(70);
        let forward = ModelTrainer::new(9, vec![ModelKind::RandomForest, ModelKind::LogisticRegression])
            .train_and_compare_models(&table, "result", 0.3, &small_params(), false)
            .unwrap();
        let reversed = ModelTrainer::new(9, vec![ModelKind::LogisticRegression, ModelKind::RandomForest])
            .train_and_compare_models(&table, "result", 0.3, &small_params(), true)
            .unwrap();
        for name in ["baseline", "random_forest", "logistic_regression"] {
            assert_eq!(
                forward.metrics(name).unwrap(),
                reversed.metrics(name).unwrap(),
                "metrics for {name} changed with candidate order"
            );
        }
    }

    #[test]
    fn test_missing_target_fails_before_fitting() {
        let table = sample_table(10);
        let trainer = ModelTrainer::new(1, all_candidates());
        let err = trainer
            .train_and_compare_models(&table, "winner", 0.2, &small_params(), false)
            .unwrap_err();
        assert!(matches!(err, TrainingError::MissingColumn { .. }));
    }

    #[test]
    fn test_bad_fraction_fails() {
        let table = sample_table(10);
        let trainer = ModelTrainer::new(1, vec![]);
        let err = trainer
            .train_and_compare_models(&table, "result", 1.5, &small_params(), false)
            .unwrap_err();
        assert!(matches!(err, TrainingError::InvalidTestFraction { .. }));
    }

    #[test]
    fn test_bundle_round_trips_through_json() {
        let table = sample_table(50);
        let trainer = ModelTrainer::new(3, vec![ModelKind::RandomForest]);
        let comparator = trainer
            .train_and_compare_models(&table, "result", 0.2, &small_params(), false)
            .unwrap();
        let bundle = comparator.bundle("random_forest").unwrap();
        let json = serde_json::to_string(&bundle).unwrap();
        let restored: crate::comparator::ModelBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.name, "random_forest");
        assert_eq!(restored.feature_columns, comparator.feature_columns());

        // The deserialized model predicts exactly like the original.
        let dataset = Dataset::from_table(&table, "result").unwrap();
        let (_, test) = dataset.train_test_split(0.2, 3).unwrap();
        assert_eq!(
            restored.model.predict(&test.x),
            comparator.model("random_forest").unwrap().predict(&test.x)
        );
    }

    #[test]
    fn test_real_candidates_beat_noise_floor() {
        // Labels follow rating_diff almost directly; the learners should be
        // well above the baseline on a 3-class problem.
        let table = sample_table(100);
        let trainer = ModelTrainer::new(42, all_candidates());
        let comparator = trainer
            .train_and_compare_models(&table, "result", 0.2, &small_params(), true)
            .unwrap();
        let baseline = comparator.metrics("baseline").unwrap()[METRIC_ACCURACY];
        let forest = comparator.metrics("random_forest").unwrap()[METRIC_ACCURACY];
        assert!(
            forest > baseline,
            "random forest {forest} should beat baseline {baseline}"
        );
        let (best, _) = comparator.select_best_model(METRIC_F1_WEIGHTED).unwrap();
        assert_ne!(best, "baseline");
    }
}
