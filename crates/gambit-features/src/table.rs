//! Fixed-schema feature vectors and their tabular form.

use serde::{Deserialize, Serialize};

use crate::time_control::TimeControlClass;

/// One game's features. Every field is always present; degraded inputs show
/// up as zeros and sentinel categories, never as missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub white_rating: f64,
    pub black_rating: f64,
    /// White minus Black, from the defaulted ratings.
    pub rating_diff: f64,
    pub avg_rating: f64,
    /// Plies actually examined; never exceeds the configured horizon.
    pub num_moves: usize,
    pub eval_mean: f64,
    pub eval_std: f64,
    pub eval_max: f64,
    pub eval_min: f64,
    pub eval_final: f64,
    /// Last minus first evaluation when at least two exist, else 0.
    pub eval_trend: f64,
    pub time_control: TimeControlClass,
    pub opening: String,
}

/// A named column of uniform type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl Column {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Categorical(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("column '{column}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[display("table already has a column named '{column}'")]
    DuplicateColumn { column: String },
}

/// Column-oriented feature set: one row per game, fixed insertion-ordered
/// columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<(String, Column)>,
    n_rows: usize,
}

impl FeatureTable {
    /// Assembles the table from extracted vectors.
    ///
    /// The schema is fixed: the same columns appear in the same order no
    /// matter what the vectors contain, including for an empty batch.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_vectors(vectors: &[FeatureVector]) -> Self {
        let numeric = |f: fn(&FeatureVector) -> f64| -> Column {
            Column::Numeric(vectors.iter().map(f).collect())
        };
        let columns = vec![
            ("white_rating".to_owned(), numeric(|v| v.white_rating)),
            ("black_rating".to_owned(), numeric(|v| v.black_rating)),
            ("rating_diff".to_owned(), numeric(|v| v.rating_diff)),
            ("avg_rating".to_owned(), numeric(|v| v.avg_rating)),
            (
                "num_moves".to_owned(),
                Column::Numeric(vectors.iter().map(|v| v.num_moves as f64).collect()),
            ),
            ("eval_mean".to_owned(), numeric(|v| v.eval_mean)),
            ("eval_std".to_owned(), numeric(|v| v.eval_std)),
            ("eval_max".to_owned(), numeric(|v| v.eval_max)),
            ("eval_min".to_owned(), numeric(|v| v.eval_min)),
            ("eval_final".to_owned(), numeric(|v| v.eval_final)),
            ("eval_trend".to_owned(), numeric(|v| v.eval_trend)),
            (
                "time_control".to_owned(),
                Column::Categorical(
                    vectors.iter().map(|v| v.time_control.to_string()).collect(),
                ),
            ),
            (
                "opening".to_owned(),
                Column::Categorical(vectors.iter().map(|v| v.opening.clone()).collect()),
            ),
        ];
        Self {
            columns,
            n_rows: vectors.len(),
        }
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, data)| data)
    }

    /// Appends a column, typically the training label.
    pub fn push_column(&mut self, name: &str, column: Column) -> Result<(), TableError> {
        if self.column(name).is_some() {
            return Err(TableError::DuplicateColumn {
                column: name.to_owned(),
            });
        }
        if column.len() != self.n_rows {
            return Err(TableError::LengthMismatch {
                column: name.to_owned(),
                expected: self.n_rows,
                actual: column.len(),
            });
        }
        self.columns.push((name.to_owned(), column));
        Ok(())
    }
}
