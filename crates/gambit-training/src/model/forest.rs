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

/// Bagged ensemble of gini trees with per-split feature subsampling.
///
/// Each tree trains on a bootstrap sample and sees `sqrt(p)` candidate
/// features per split. Prediction is a majority vote, smallest class index
/// on ties. All randomness comes from the seed passed at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
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
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let n = y.len();
        #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let subsample = ((x.ncols() as f64).sqrt().round() as usize).max(1);
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            feature_subsample: Some(subsample),
        };

        let mut trees = Vec::with_capacity(params.n_estimators);
        for _ in 0..params.n_estimators {
            let indices: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
            let (bx, by) = take_rows(x, y, &indices);
            trees.push(DecisionTree::fit(&bx, &by, n_classes, &tree_params, &mut rng)?);
        }
        Ok(Self { trees, n_classes })
    }

    pub(crate) fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        x.outer_iter()
            .map(|row| {
                let mut votes = vec![0.0_f64; self.n_classes];
                for tree in &self.trees {
                    votes[tree.predict_row(row)] += 1.0;
                }
                argmax(&votes)
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
