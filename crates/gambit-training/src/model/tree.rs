//! CART-style classification tree with gini impurity splits.

use ndarray::{Array2, ArrayView1};
use rand::Rng as _;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

const MIN_SAMPLES_SPLIT: usize = 2;
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TreeNode {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Tree-growing knobs; `feature_subsample` is set by ensemble callers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_depth: usize,
    /// Candidate features considered per split; `None` means all of them.
    pub feature_subsample: Option<usize>,
}

/// A fitted classification tree.
///
/// Rows descend left when `value <= threshold`. Growing is deterministic
/// given the RNG state: candidate features keep their sampled order, and a
/// split must strictly improve gini gain to replace the incumbent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
    n_classes: usize,
}

impl DecisionTree {
    pub(crate) fn fit(
        x: &Array2<f64>,
        y: &[usize],
        n_classes: usize,
        params: &TreeParams,
        rng: &mut Pcg64Mcg,
    ) -> Result<Self, FitError> {
        if y.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }
        let indices: Vec<usize> = (0..y.len()).collect();
        let root = build_node(x, y, n_classes, &indices, params, 0, rng);
        Ok(Self { root, n_classes })
    }

    pub(crate) fn predict_row(&self, row: ArrayView1<'_, f64>) -> usize {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    pub(crate) fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        x.outer_iter().map(|row| self.predict_row(row)).collect()
    }

    #[cfg(test)]
    pub(crate) fn n_classes(&self) -> usize {
        self.n_classes
    }
}

fn build_node(
    x: &Array2<f64>,
    y: &[usize],
    n_classes: usize,
    indices: &[usize],
    params: &TreeParams,
    depth: usize,
    rng: &mut Pcg64Mcg,
) -> TreeNode {
    let counts = class_counts(y, indices, n_classes);
    let majority = majority_class(&counts);
    if depth >= params.max_depth
        || indices.len() < MIN_SAMPLES_SPLIT
        || counts.iter().filter(|&&c| c > 0).count() <= 1
    {
        return TreeNode::Leaf { class: majority };
    }

    let features = candidate_features(x.ncols(), params.feature_subsample, rng);
    let Some((feature, threshold)) = best_split(x, y, indices, &features, &counts) else {
        return TreeNode::Leaf { class: majority };
    };

    let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[[i, feature]] <= threshold);

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_node(
            x,
            y,
            n_classes,
            &left_indices,
            params,
            depth + 1,
            rng,
        )),
        right: Box::new(build_node(
            x,
            y,
            n_classes,
            &right_indices,
            params,
            depth + 1,
            rng,
        )),
    }
}

fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0_usize; n_classes];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
}

fn majority_class(counts: &[usize]) -> usize {
    let mut class = 0;
    for (candidate, &count) in counts.iter().enumerate() {
        if count > counts[class] {
            class = candidate;
        }
    }
    class
}

#[expect(clippy::cast_precision_loss)]
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| (c as f64 / n).powi(2))
        .sum::<f64>()
}

/// Features to consider at one split, in sampled order.
fn candidate_features(
    n_features: usize,
    subsample: Option<usize>,
    rng: &mut Pcg64Mcg,
) -> Vec<usize> {
    let mut features: Vec<usize> = (0..n_features).collect();
    let Some(k) = subsample else {
        return features;
    };
    let k = k.clamp(1, n_features);
    // Partial Fisher-Yates: the first k entries are a uniform sample.
    for i in 0..k {
        let j = rng.random_range(i..n_features);
        features.swap(i, j);
    }
    features.truncate(k);
    features
}

/// Best (feature, threshold) by gini gain, or `None` when no candidate
/// strictly improves on the parent.
#[expect(clippy::cast_precision_loss)]
fn best_split(
    x: &Array2<f64>,
    y: &[usize],
    indices: &[usize],
    features: &[usize],
    parent_counts: &[usize],
) -> Option<(usize, f64)> {
    let total = indices.len();
    let parent_gini = gini(parent_counts, total);
    let n = total as f64;

    let mut best: Option<(f64, usize, f64)> = None;
    for &feature in features {
        let mut samples: Vec<(f64, usize)> = indices
            .iter()
            .map(|&i| (x[[i, feature]], y[i]))
            .collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_counts = vec![0_usize; parent_counts.len()];
        let mut right_counts = parent_counts.to_vec();
        for k in 1..samples.len() {
            let (value, class) = samples[k - 1];
            left_counts[class] += 1;
            right_counts[class] -= 1;
            if samples[k].0 <= value {
                continue;
            }
            let n_left = k;
            let n_right = total - k;
            let weighted = (n_left as f64 / n) * gini(&left_counts, n_left)
                + (n_right as f64 / n) * gini(&right_counts, n_right);
            let gain = parent_gini - weighted;
            if gain > MIN_GAIN && best.is_none_or(|(best_gain, _, _)| gain > best_gain) {
                best = Some((gain, feature, f64::midpoint(value, samples[k].0)));
            }
        }
    }
    best.map(|(_, feature, threshold)| (feature, threshold))
}
