use clap::{Parser, Subcommand};

use self::{
    clean::CleanArg, extract_features::ExtractFeaturesArg, train::TrainArg,
};

mod clean;
mod extract_features;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Chess game outcome predictor", long_about = None)]
pub struct CommandArgs {
    /// Pipeline stage to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Deduplicate, rating-filter and label-filter raw games
    Clean(#[clap(flatten)] CleanArg),
    /// Turn cleaned games into the tabular feature set
    ExtractFeatures(#[clap(flatten)] ExtractFeaturesArg),
    /// Train candidate models, compare them and export the winner
    Train(#[clap(flatten)] TrainArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Clean(arg) => clean::run(&arg)?,
        Mode::ExtractFeatures(arg) => extract_features::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
    }
    Ok(())
}
