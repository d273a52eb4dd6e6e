use std::path::PathBuf;

use gambit_engine::{GameRecord, Outcome};
use gambit_features::{Column, FeatureExtractor};

use crate::config::Config;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExtractFeaturesArg {
    /// Cleaned games JSON file
    #[arg(long)]
    input: PathBuf,
    /// Feature table output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExtractFeaturesArg) -> anyhow::Result<()> {
    let config = Config::load_or_default(arg.config.as_deref())?;
    let games: Vec<GameRecord> = crate::io::read_json("games", &arg.input)?;

    // Games that survived cleaning all carry a parseable result; anything
    // else cannot be labeled and is skipped here.
    let (labeled, outcomes): (Vec<GameRecord>, Vec<Outcome>) = games
        .into_iter()
        .filter_map(|game| {
            let outcome = game.result.as_deref().and_then(Outcome::parse_result)?;
            Some((game, outcome))
        })
        .unzip();
    if labeled.is_empty() {
        anyhow::bail!("no labeled games in {}", arg.input.display());
    }

    let extractor = FeatureExtractor::new(config.features.horizon())?;
    eprintln!(
        "Extracting features for {} games ({} half-move horizon)",
        labeled.len(),
        extractor.half_move_horizon()
    );
    let mut table = extractor.extract_batch(&labeled);
    table.push_column(
        "result",
        Column::Categorical(outcomes.iter().map(ToString::to_string).collect()),
    )?;

    eprintln!("Extracted {} rows x {} columns", table.n_rows(), table.n_columns());
    crate::io::write_json("feature table", &table, arg.output.as_ref())
}
