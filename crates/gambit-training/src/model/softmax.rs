use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::{error::FitError, model::argmax};

const MAX_ITERATIONS: usize = 400;
const LEARNING_RATE: f64 = 0.3;
const L2_PENALTY: f64 = 1e-4;

/// Multinomial logistic regression trained by batch gradient descent.
///
/// Features are standardized internally (the scaler is part of the model),
/// weights start at zero, and the step count is fixed, so fitting is fully
/// deterministic - this candidate ignores the seed and the tree knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    weights: Array2<f64>,
    intercept: Array1<f64>,
    means: Array1<f64>,
    scales: Array1<f64>,
}

impl SoftmaxRegression {
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn fit(
        x: &Array2<f64>,
        y: &[usize],
        n_classes: usize,
    ) -> Result<Self, FitError> {
        if y.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }
        let n = x.nrows() as f64;
        let p = x.ncols();

        let means = x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(p));
        // Constant columns keep a unit scale instead of dividing by zero.
        let scales = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });
        let xs = standardize(x, &means, &scales);

        let targets = one_hot(y, n_classes);
        let mut weights = Array2::<f64>::zeros((p, n_classes));
        let mut intercept = Array1::<f64>::zeros(n_classes);

        for iteration in 0..MAX_ITERATIONS {
            let probabilities = softmax_rows(&(xs.dot(&weights) + &intercept));
            let residual = &probabilities - &targets;
            let gradient_w = xs.t().dot(&residual) / n + L2_PENALTY * &weights;
            let gradient_b = residual.sum_axis(Axis(0)) / n;
            weights = weights - LEARNING_RATE * gradient_w;
            intercept = intercept - LEARNING_RATE * gradient_b;
            if !weights.iter().all(|w| w.is_finite()) {
                return Err(FitError::Diverged { iteration });
            }
        }

        Ok(Self {
            weights,
            intercept,
            means,
            scales,
        })
    }

    pub(crate) fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        let xs = standardize(x, &self.means, &self.scales);
        let logits = xs.dot(&self.weights) + &self.intercept;
        logits
            .outer_iter()
            .map(|row| argmax(&row.to_vec()))
            .collect()
    }
}

fn standardize(x: &Array2<f64>, means: &Array1<f64>, scales: &Array1<f64>) -> Array2<f64> {
    (x - means) / scales
}

fn one_hot(y: &[usize], n_classes: usize) -> Array2<f64> {
    let mut targets = Array2::<f64>::zeros((y.len(), n_classes));
    for (i, &class) in y.iter().enumerate() {
        targets[[i, class]] = 1.0;
    }
    targets
}

/// Row-wise softmax with the usual max-shift for numerical stability.
fn softmax_rows(logits: &Array2<f64>) -> Array2<f64> {
    let mut out = logits.clone();
    for mut row in out.outer_iter_mut() {
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    out
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn separable() -> (Array2<f64>, Vec<usize>) {
        let x = array![
            [-2.0, 0.0],
            [-1.5, 0.5],
            [-1.8, -0.2],
            [2.0, 0.1],
            [1.6, -0.4],
            [1.9, 0.3]
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn test_learns_separable_data() {
        let (x, y) = separable();
        let model = SoftmaxRegression::fit(&x, &y, 2).unwrap();
        assert_eq!(model.predict(&x), y);
        assert_eq!(model.predict(&array![[-3.0, 0.0], [3.0, 0.0]]), vec![0, 1]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable();
        let a = SoftmaxRegression::fit(&x, &y, 2).unwrap();
        let b = SoftmaxRegression::fit(&x, &y, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_constant_column_does_not_blow_up() {
        let x = array![[1.0, 7.0], [2.0, 7.0], [3.0, 7.0], [4.0, 7.0]];
        let y = vec![0, 0, 1, 1];
        let model = SoftmaxRegression::fit(&x, &y, 2).unwrap();
        let predictions = model.predict(&x);
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_three_classes() {
        let x = array![
            [0.0, 0.0],
            [0.1, 0.2],
            [5.0, 5.0],
            [5.1, 4.9],
            [0.0, 5.0],
            [0.2, 5.1]
        ];
        let y = vec![0, 0, 1, 1, 2, 2];
        let model = SoftmaxRegression::fit(&x, &y, 3).unwrap();
        assert_eq!(model.predict(&x), y);
    }

    #[test]
    fn test_empty_targets_fail() {
        let x = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            SoftmaxRegression::fit(&x, &[], 2),
            Err(FitError::EmptyTrainingSet)
        ));
    }
}
