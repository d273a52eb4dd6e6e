//! Candidate model implementations.
//!
//! Every candidate is a named [`ModelKind`] that fits into a serializable
//! [`TrainedModel`]. All models share the same knobs ([`Hyperparams`]) and
//! ignore the ones that do not apply to them; all tie-breaks (majority
//! votes, argmax over scores) resolve to the smallest class index so that
//! predictions are deterministic.

use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{dataset::Dataset, error::FitError};

mod baseline;
mod boosted;
mod forest;
mod softmax;
mod tree;

pub use self::{
    baseline::MajorityClassModel, boosted::BoostedTrees, forest::RandomForest,
    softmax::SoftmaxRegression, tree::DecisionTree,
};

/// The candidate model types a run can fit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Majority-class floor every real candidate must beat.
    #[display("baseline")]
    Baseline,
    #[display("logistic_regression")]
    LogisticRegression,
    #[display("random_forest")]
    RandomForest,
    #[display("boosted_trees")]
    BoostedTrees,
}

impl ModelKind {
    /// Fixed per-kind RNG stream, so a candidate's randomness depends on
    /// what it is, not on where it sits in the launch order.
    pub(crate) fn seed_stream(self) -> u64 {
        match self {
            Self::Baseline => 0,
            Self::LogisticRegression => 1,
            Self::RandomForest => 2,
            Self::BoostedTrees => 3,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown model kind '{name}'")]
pub struct UnknownModelKind {
    name: String,
}

impl FromStr for ModelKind {
    type Err = UnknownModelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Self::Baseline),
            "logistic_regression" => Ok(Self::LogisticRegression),
            "random_forest" => Ok(Self::RandomForest),
            // `xgboost` is what older pipeline configs called their boosted
            // candidate.
            "boosted_trees" | "xgboost" => Ok(Self::BoostedTrees),
            _ => Err(UnknownModelKind { name: s.to_owned() }),
        }
    }
}

/// Shared hyperparameter knobs. Models ignore knobs that do not apply
/// (softmax regression uses neither).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperparams {
    pub n_estimators: usize,
    pub max_depth: usize,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
        }
    }
}

/// A fitted candidate, ready to predict and to serialize into a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainedModel {
    Baseline(MajorityClassModel),
    LogisticRegression(SoftmaxRegression),
    RandomForest(RandomForest),
    BoostedTrees(BoostedTrees),
}

impl TrainedModel {
    /// Fits `kind` on the training partition.
    ///
    /// `seed` drives all of the candidate's randomness; deterministic models
    /// ignore it.
    pub(crate) fn fit(
        kind: ModelKind,
        train: &Dataset,
        params: &Hyperparams,
        seed: u64,
    ) -> Result<Self, FitError> {
        let n_classes = train.n_classes();
        match kind {
            ModelKind::Baseline => {
                MajorityClassModel::fit(&train.y, n_classes).map(Self::Baseline)
            }
            ModelKind::LogisticRegression => {
                SoftmaxRegression::fit(&train.x, &train.y, n_classes).map(Self::LogisticRegression)
            }
            ModelKind::RandomForest => {
                RandomForest::fit(&train.x, &train.y, n_classes, params, seed)
                    .map(Self::RandomForest)
            }
            ModelKind::BoostedTrees => {
                BoostedTrees::fit(&train.x, &train.y, n_classes, params, seed)
                    .map(Self::BoostedTrees)
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Baseline(_) => ModelKind::Baseline,
            Self::LogisticRegression(_) => ModelKind::LogisticRegression,
            Self::RandomForest(_) => ModelKind::RandomForest,
            Self::BoostedTrees(_) => ModelKind::BoostedTrees,
        }
    }

    /// Predicts a class index per row of `x`.
    #[must_use]
    pub fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        match self {
            Self::Baseline(model) => model.predict(x.nrows()),
            Self::LogisticRegression(model) => model.predict(x),
            Self::RandomForest(model) => model.predict(x),
            Self::BoostedTrees(model) => model.predict(x),
        }
    }
}

/// Index of the strictly greatest score; earlier indices win ties.
pub(crate) fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = index;
        }
    }
    best
}

/// Materializes the rows of a bootstrap sample.
pub(crate) fn take_rows(
    x: &Array2<f64>,
    y: &[usize],
    indices: &[usize],
) -> (Array2<f64>, Vec<usize>) {
    (
        x.select(ndarray::Axis(0), indices),
        indices.iter().map(|&i| y[i]).collect(),
    )
}
