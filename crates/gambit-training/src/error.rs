/// A single candidate model failed to fit.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("training set is empty")]
    EmptyTrainingSet,
    #[display("optimizer diverged at iteration {iteration}")]
    Diverged { iteration: usize },
}

/// A training run could not produce a complete, comparable result.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TrainingError {
    #[display("feature table has no column named '{name}'")]
    MissingColumn { name: String },
    #[display("target column '{name}' must be categorical")]
    NonCategoricalTarget { name: String },
    #[display("feature table has no rows")]
    EmptyTable,
    #[display("test fraction {fraction} is outside (0, 1)")]
    InvalidTestFraction { fraction: f64 },
    #[display("need at least two rows to split into train and test, got {rows}")]
    TooFewRows { rows: usize },
    #[display("metric '{name}' was not computed for every model")]
    InvalidMetric { name: String },
    #[display("training candidate '{model}' failed: {source}")]
    Candidate { model: String, source: FitError },
}
