//! SAMME-style boosting over shallow classification trees.

use ndarray::Array2;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::{
    error::FitError,
    model::{
        Hyperparams, argmax, take_rows,
        tree::{DecisionTree, TreeParams},
    },
};

/// Weighted error below which a stage is treated as a perfect fit.
const MIN_STAGE_ERROR: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BoostStage {
    tree: DecisionTree,
    weight: f64,
}

/// Boosted-tree classifier (multiclass SAMME with weighted resampling).
///
/// Each round draws a bootstrap sample proportional to the current sample
/// weights, fits a tree on it, and reweights the samples the tree got
/// wrong. Rounds whose weighted error is no better than chance end the
/// ensemble early; a perfect round ends it with a dominant stage weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedTrees {
    stages: Vec<BoostStage>,
    n_classes: usize,
}

impl BoostedTrees {
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn fit(
        x: &Array2<f64>,
        y: &[usize],
        n_classes: usize,
        params: &Hyperparams,
        seed: u64,
    ) -> Result<Self, FitError> {
        if y.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }
        let n = y.len();
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let mut weights = vec![1.0 / n as f64; n];
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            feature_subsample: None,
        };
        // A stage must beat uniform guessing across K classes.
        let chance = 1.0 - 1.0 / n_classes as f64;
        let mut stages = Vec::new();

        for _ in 0..params.n_estimators {
            let indices = weighted_bootstrap(&weights, &mut rng);
            let (bx, by) = take_rows(x, y, &indices);
            let tree = DecisionTree::fit(&bx, &by, n_classes, &tree_params, &mut rng)?;

            let predictions = tree.predict(x);
            let error: f64 = weights
                .iter()
                .zip(predictions.iter().zip(y))
                .filter(|(_, (predicted, actual))| predicted != actual)
                .map(|(w, _)| w)
                .sum();

            if error >= chance {
                if stages.is_empty() {
                    // Nothing beats chance on this data; keep one unweighted
                    // stage so the model still predicts.
                    stages.push(BoostStage { tree, weight: 1.0 });
                }
                break;
            }

            let bounded = error.max(MIN_STAGE_ERROR);
            let alpha = ((1.0 - bounded) / bounded).ln() + (n_classes as f64 - 1.0).ln();
            stages.push(BoostStage { tree, weight: alpha });
            if error <= MIN_STAGE_ERROR {
                break;
            }

            let boost = alpha.exp();
            for (weight, (predicted, actual)) in
                weights.iter_mut().zip(predictions.iter().zip(y))
            {
                if predicted != actual {
                    *weight *= boost;
                }
            }
            let total: f64 = weights.iter().sum();
            for weight in &mut weights {
                *weight /= total;
            }
        }

        Ok(Self { stages, n_classes })
    }

    pub(crate) fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        x.outer_iter()
            .map(|row| {
                let mut scores = vec![0.0_f64; self.n_classes];
                for stage in &self.stages {
                    scores[stage.tree.predict_row(row)] += stage.weight;
                }
                argmax(&scores)
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn n_stages(&self) -> usize {
        self.stages.len()
    }
}

/// Draws `weights.len()` indices with probability proportional to weight.
fn weighted_bootstrap(weights: &[f64], rng: &mut Pcg64Mcg) -> Vec<usize> {
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut total = 0.0;
    for &weight in weights {
        total += weight;
        cumulative.push(total);
    }
    (0..weights.len())
        .map(|_| {
            let draw = rng.random::<f64>() * total;
            cumulative
                .partition_point(|&c| c <= draw)
                .min(weights.len() - 1)
        })
        .collect()
}
