//! Model training and comparison for the outcome-prediction pipeline.
//!
//! This crate fits a set of candidate classifiers against one shared feature
//! table and compares them on one shared held-out partition:
//!
//! 1. **Dataset assembly** ([`dataset`]) - a [`gambit_features::FeatureTable`]
//!    becomes a numeric design matrix with recorded feature columns and
//!    deterministic categorical encodings.
//! 2. **Candidate fitting** ([`model`]) - a majority-class baseline plus the
//!    configured classifiers (softmax regression, random forest, boosted
//!    trees), each owning its model state exclusively.
//! 3. **Comparison and selection** ([`trainer`], [`comparator`]) - every
//!    model is scored on the identical test partition; the comparator ranks
//!    on demand and exports the winning model as a self-contained bundle.
//!
//! # Determinism
//!
//! All randomness flows from the trainer's construction-time seed through
//! per-candidate `Pcg64Mcg` streams keyed by model identity, so the same
//! seed and data reproduce the same split, models and metrics - in parallel
//! and sequential mode alike, and regardless of candidate order.
//!
//! # Failure policy
//!
//! Structural problems (missing target column, bad split fraction, unknown
//! selection metric) and any candidate that fails to fit abort the whole
//! run; a silently smaller candidate set would make comparisons across runs
//! meaningless.

pub mod comparator;
pub mod dataset;
pub mod error;
pub mod model;
pub mod trainer;

pub use self::{
    comparator::{ComparisonRecord, Metrics, ModelBundle, ModelComparator},
    dataset::Dataset,
    error::{FitError, TrainingError},
    model::{Hyperparams, ModelKind, TrainedModel},
    trainer::{
        METRIC_ACCURACY, METRIC_F1_WEIGHTED, METRIC_PRECISION_WEIGHTED, METRIC_RECALL_WEIGHTED,
        ModelTrainer,
    },
};
