use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quorum_model::{AttendanceMatrix, ProbabilityLookup, ProbabilityModel};

use crate::data;

mod recommend;
mod score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Recurring meeting-time recommendation", long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for recommended recurring schedules
    Recommend(#[clap(flatten)] recommend::RecommendArg),
    /// Score one explicitly given schedule
    Score(#[clap(flatten)] score::ScoreArg),
}

/// Flags shared by every command that builds the probability model.
#[derive(Debug, Clone, Args)]
pub(crate) struct ModelArg {
    /// Path to the attendance table (tab-separated; optional name column)
    pub data: PathBuf,

    /// Number of meetings to simulate per candidate schedule
    #[arg(long, default_value_t = 12)]
    pub meetings: usize,

    /// Minimum attending fraction for a meeting to happen
    #[arg(long, default_value_t = 0.5 + 1e-6)]
    pub quorum: f64,

    /// Probability per ordinal code, overriding the built-in 0-5 calibration
    #[arg(long, value_delimiter = ',')]
    pub lookup: Option<Vec<f64>>,
}

impl ModelArg {
    pub(crate) fn build(&self) -> anyhow::Result<(AttendanceMatrix, ProbabilityModel)> {
        anyhow::ensure!(self.meetings > 0, "--meetings must be at least 1");
        let matrix = data::load_file(&self.data)?;
        let lookup = match &self.lookup {
            Some(values) => ProbabilityLookup::new(values.clone())?,
            None => ProbabilityLookup::default(),
        };
        let model = ProbabilityModel::build(&matrix, &lookup, self.quorum)?;
        Ok((matrix, model))
    }
}

pub fn run() -> anyhow::Result<()> {
    match CommandArgs::parse().mode {
        Mode::Recommend(arg) => recommend::run(&arg),
        Mode::Score(arg) => score::run(&arg),
    }
}
