use std::path::PathBuf;

use gambit_engine::{GameRecord, cleaning};

use crate::config::Config;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CleanArg {
    /// Raw games JSON file
    #[arg(long)]
    input: PathBuf,
    /// Cleaned games output path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &CleanArg) -> anyhow::Result<()> {
    let config = Config::load_or_default(arg.config.as_deref())?;
    let mut games: Vec<GameRecord> = crate::io::read_json("games", &arg.input)?;
    let loaded = games.len();

    cleaning::dedup_games(&mut games);
    let deduped = games.len();
    cleaning::filter_by_rating(
        &mut games,
        cleaning::RatingRange {
            min: config.cleaning.min_rating,
            max: config.cleaning.max_rating,
        },
    );
    let in_range = games.len();
    cleaning::retain_labeled(&mut games);

    eprintln!("Loaded {loaded} games");
    eprintln!("  {} after deduplication", deduped);
    eprintln!(
        "  {} within rating range {}-{}",
        in_range, config.cleaning.min_rating, config.cleaning.max_rating
    );
    eprintln!("  {} with a usable result", games.len());

    crate::io::write_json("cleaned games", &games, arg.output.as_ref())
}
