//! Feature table to design matrix conversion and seeded splitting.

use std::collections::{BTreeMap, BTreeSet};

use gambit_features::{Column, FeatureTable};
use ndarray::{Array2, Axis};
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

use crate::error::TrainingError;

/// Columns that identify rows rather than describe them; never fed to a
/// model.
const IDENTIFIER_COLUMNS: &[&str] = &["id"];

/// Encoded training data: numeric design matrix, class-index targets, and
/// the exact recipe (columns + encodings) that produced the matrix.
///
/// The recipe travels with every persisted model so that inference can
/// rebuild an identically shaped input; adding a decorative column to the
/// source table can never change what a model sees.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) x: Array2<f64>,
    pub(crate) y: Vec<usize>,
    /// Input columns used for fitting, in table order.
    pub feature_columns: Vec<String>,
    /// Sorted category list per categorical feature column.
    pub encodings: BTreeMap<String, Vec<String>>,
    /// Sorted target labels; `y` holds indices into this list.
    pub class_labels: Vec<String>,
}

impl Dataset {
    /// Encodes a feature table against the named target column.
    ///
    /// The target must be categorical; feature columns are every remaining
    /// column except identifiers. Categorical features are label-encoded
    /// against their sorted unique values, which makes the encoding
    /// independent of row order.
    pub fn from_table(table: &FeatureTable, target_column: &str) -> Result<Self, TrainingError> {
        let target = table
            .column(target_column)
            .ok_or_else(|| TrainingError::MissingColumn {
                name: target_column.to_owned(),
            })?;
        let Column::Categorical(labels) = target else {
            return Err(TrainingError::NonCategoricalTarget {
                name: target_column.to_owned(),
            });
        };
        if table.n_rows() == 0 {
            return Err(TrainingError::EmptyTable);
        }

        let class_labels = sorted_unique(labels);
        let y: Vec<usize> = labels
            .iter()
            .map(|label| index_of(&class_labels, label))
            .collect();

        let feature_columns: Vec<String> = table
            .column_names()
            .filter(|name| *name != target_column && !IDENTIFIER_COLUMNS.contains(name))
            .map(str::to_owned)
            .collect();

        let mut encodings = BTreeMap::new();
        let mut x = Array2::<f64>::zeros((table.n_rows(), feature_columns.len()));
        for (j, name) in feature_columns.iter().enumerate() {
            let column = table
                .column(name)
                .expect("feature columns are drawn from the table");
            match column {
                Column::Numeric(values) => {
                    for (i, &value) in values.iter().enumerate() {
                        x[[i, j]] = value;
                    }
                }
                Column::Categorical(values) => {
                    let categories = sorted_unique(values);
                    #[expect(clippy::cast_precision_loss)]
                    for (i, value) in values.iter().enumerate() {
                        x[[i, j]] = index_of(&categories, value) as f64;
                    }
                    encodings.insert(name.clone(), categories);
                }
            }
        }

        Ok(Self {
            x,
            y,
            feature_columns,
            encodings,
            class_labels,
        })
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.y.len()
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.class_labels.len()
    }

    /// Targets as class indices, parallel to the matrix rows.
    #[must_use]
    pub fn targets(&self) -> &[usize] {
        &self.y
    }

    /// Splits into (train, test) with a seeded shuffle.
    ///
    /// The same seed and data always produce the identical split. The test
    /// partition receives `ceil(n * test_fraction)` rows, at least one row
    /// staying on each side.
    pub fn train_test_split(
        &self,
        test_fraction: f64,
        seed: u64,
    ) -> Result<(Self, Self), TrainingError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(TrainingError::InvalidTestFraction {
                fraction: test_fraction,
            });
        }
        let n = self.n_rows();
        if n < 2 {
            return Err(TrainingError::TooFewRows { rows: n });
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_test = ((n as f64) * test_fraction).ceil() as usize;
        let n_test = n_test.clamp(1, n - 1);
        let (train_indices, test_indices) = indices.split_at(n - n_test);
        Ok((self.subset(train_indices), self.subset(test_indices)))
    }

    fn subset(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: indices.iter().map(|&i| self.y[i]).collect(),
            feature_columns: self.feature_columns.clone(),
            encodings: self.encodings.clone(),
            class_labels: self.class_labels.clone(),
        }
    }
}

fn sorted_unique(values: &[String]) -> Vec<String> {
    values
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn index_of(sorted: &[String], value: &String) -> usize {
    sorted
        .binary_search(value)
        .expect("value came from the list the categories were built from")
}

#[cfg(test)]
mod tests {
    use gambit_features::{FeatureVector, TimeControlClass};

    use super::*;

    fn table(labels: &[&str]) -> FeatureTable {
        #[expect(clippy::cast_precision_loss)]
        let vectors: Vec<FeatureVector> = (0..labels.len())
            .map(|i| FeatureVector {
                white_rating: 1500.0 + i as f64,
                black_rating: 1500.0,
                rating_diff: i as f64,
                avg_rating: 1500.0 + i as f64 / 2.0,
                num_moves: i,
                eval_mean: 0.0,
                eval_std: 0.0,
                eval_max: 0.0,
                eval_min: 0.0,
                eval_final: 0.0,
                eval_trend: 0.0,
                time_control: if i % 2 == 0 {
                    TimeControlClass::Blitz
                } else {
                    TimeControlClass::Rapid
                },
                opening: format!("Opening {}", i % 3),
            })
            .collect();
        let mut table = FeatureTable::from_vectors(&vectors);
        table
            .push_column(
                "result",
                Column::Categorical(labels.iter().map(|&l| l.to_owned()).collect()),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_missing_target_column() {
        let table = table(&["draw", "white_win"]);
        let err = Dataset::from_table(&table, "nope").unwrap_err();
        assert!(matches!(err, TrainingError::MissingColumn { .. }));
    }

    #[test]
    fn test_numeric_target_is_rejected() {
        let table = table(&["draw", "white_win"]);
        let err = Dataset::from_table(&table, "rating_diff").unwrap_err();
        assert!(matches!(err, TrainingError::NonCategoricalTarget { .. }));
    }

    #[test]
    fn test_class_labels_are_sorted_unique() {
        let table = table(&["white_win", "draw", "black_win", "draw"]);
        let dataset = Dataset::from_table(&table, "result").unwrap();
        assert_eq!(dataset.class_labels, vec!["black_win", "draw", "white_win"]);
        assert_eq!(dataset.targets(), &[2, 1, 0, 1]);
    }

    #[test]
    fn test_feature_columns_exclude_target_and_id() {
        let mut with_id = table(&["draw", "white_win"]);
        with_id
            .push_column(
                "id",
                Column::Categorical(vec!["g1".to_owned(), "g2".to_owned()]),
            )
            .unwrap();
        let dataset = Dataset::from_table(&with_id, "result").unwrap();
        assert!(!dataset.feature_columns.iter().any(|c| c == "result"));
        assert!(!dataset.feature_columns.iter().any(|c| c == "id"));
        assert_eq!(dataset.n_features(), 13);
    }

    #[test]
    fn test_categorical_features_are_encoded_and_recorded() {
        let table = table(&["draw", "white_win", "draw"]);
        let dataset = Dataset::from_table(&table, "result").unwrap();
        assert!(dataset.encodings.contains_key("time_control"));
        assert!(dataset.encodings.contains_key("opening"));
        // blitz < rapid in sorted order.
        assert_eq!(
            dataset.encodings["time_control"],
            vec!["blitz".to_owned(), "rapid".to_owned()]
        );
        let j = dataset
            .feature_columns
            .iter()
            .position(|c| c == "time_control")
            .unwrap();
        assert_eq!(dataset.x[[0, j]], 0.0);
        assert_eq!(dataset.x[[1, j]], 1.0);
    }

    #[test]
    fn test_split_is_seed_deterministic() {
        let table = table(&["draw"; 20]);
        let dataset = Dataset::from_table(&table, "result").unwrap();
        let (train_a, test_a) = dataset.train_test_split(0.25, 42).unwrap();
        let (train_b, test_b) = dataset.train_test_split(0.25, 42).unwrap();
        assert_eq!(train_a.y, train_b.y);
        assert_eq!(test_a.x, test_b.x);
        assert_eq!(train_a.n_rows(), 15);
        assert_eq!(test_a.n_rows(), 5);
    }

    #[test]
    fn test_split_rejects_bad_fractions() {
        let table = table(&["draw", "white_win"]);
        let dataset = Dataset::from_table(&table, "result").unwrap();
        assert!(matches!(
            dataset.train_test_split(0.0, 1),
            Err(TrainingError::InvalidTestFraction { .. })
        ));
        assert!(matches!(
            dataset.train_test_split(1.0, 1),
            Err(TrainingError::InvalidTestFraction { .. })
        ));
    }

    #[test]
    fn test_split_keeps_a_row_on_each_side() {
        let table = table(&["draw", "white_win", "draw"]);
        let dataset = Dataset::from_table(&table, "result").unwrap();
        let (train, test) = dataset.train_test_split(0.9, 1).unwrap();
        assert!(train.n_rows() >= 1);
        assert!(test.n_rows() >= 1);
        assert_eq!(train.n_rows() + test.n_rows(), 3);
    }
}
