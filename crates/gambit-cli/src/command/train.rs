use std::path::PathBuf;

use gambit_features::FeatureTable;
use gambit_training::{
    METRIC_ACCURACY, METRIC_F1_WEIGHTED, METRIC_PRECISION_WEIGHTED, METRIC_RECALL_WEIGHTED,
    ModelTrainer,
};

use crate::config::Config;

const TARGET_COLUMN: &str = "result";
/// Models are ranked on weighted F1, which is robust to the class imbalance
/// between decisive games and draws.
const SELECTION_METRIC: &str = METRIC_F1_WEIGHTED;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Feature table JSON file
    #[arg(long)]
    input: PathBuf,
    /// Comparison table output path (not written when omitted)
    #[arg(long)]
    comparison_output: Option<PathBuf>,
    /// Winning model bundle output path (stdout when omitted)
    #[arg(long)]
    model_output: Option<PathBuf>,
    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = Config::load_or_default(arg.config.as_deref())?;
    let table: FeatureTable = crate::io::read_json("feature table", &arg.input)?;

    let trainer = ModelTrainer::new(
        config.model.random_state,
        config.model.candidate_kinds()?,
    );
    let comparator = trainer.train_and_compare_models(
        &table,
        TARGET_COLUMN,
        config.model.test_size,
        &config.model.hyperparams(),
        config.model.parallel_training,
    )?;

    let records = comparator.compare_models();
    eprintln!();
    eprintln!(
        "{:<22} {:>9} {:>12} {:>11} {:>9}",
        "model", "accuracy", "f1_weighted", "precision", "recall"
    );
    for record in &records {
        eprintln!(
            "{:<22} {:>9.4} {:>12.4} {:>11.4} {:>9.4}",
            record.name,
            record.metrics[METRIC_ACCURACY],
            record.metrics[METRIC_F1_WEIGHTED],
            record.metrics[METRIC_PRECISION_WEIGHTED],
            record.metrics[METRIC_RECALL_WEIGHTED],
        );
    }

    let (best_name, best_metrics) = comparator.select_best_model(SELECTION_METRIC)?;
    eprintln!();
    eprintln!("Best model: {best_name}");
    eprintln!("  {SELECTION_METRIC}: {:.4}", best_metrics[SELECTION_METRIC]);
    eprintln!("  {METRIC_ACCURACY}: {:.4}", best_metrics[METRIC_ACCURACY]);

    if let Some(path) = &arg.comparison_output {
        crate::io::write_json("comparison table", &records, Some(path))?;
        eprintln!("Comparison table saved to {}", path.display());
    }

    match comparator.bundle(best_name) {
        Some(bundle) => {
            crate::io::write_json("model bundle", &bundle, arg.model_output.as_ref())?;
            if let Some(path) = &arg.model_output {
                eprintln!("Best model saved to {}", path.display());
                eprintln!("  Features: {} columns", bundle.feature_columns.len());
            }
        }
        None => {
            eprintln!("Baseline won; no model bundle to save");
        }
    }

    Ok(())
}
