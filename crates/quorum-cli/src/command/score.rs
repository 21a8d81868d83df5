use std::path::PathBuf;

use anyhow::ensure;
use clap::Args;
use quorum_evaluator::ScheduleAnalysis;
use quorum_model::Schedule;
use quorum_search::Recommendation;

use crate::{command::ModelArg, render, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct ScoreArg {
    #[command(flatten)]
    model: ModelArg,

    /// Slot indices of the schedule to score, e.g. `0,3,3`
    #[arg(long, value_delimiter = ',', required = true)]
    times: Vec<usize>,

    /// Emit the result as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Output file for --json (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let (matrix, model) = arg.model.build()?;
    for &slot in &arg.times {
        ensure!(
            slot < model.slot_count(),
            "slot {slot} out of range 0..{}",
            model.slot_count()
        );
    }
    let schedule = Schedule::new(arg.times.iter().copied())?;

    let analysis = ScheduleAnalysis::analyze(&model, schedule, arg.model.meetings);
    let recommendation = Recommendation::from_analysis(analysis);

    if arg.json {
        util::save_json(&recommendation, arg.output.as_deref())?;
    } else {
        render::print_full(&recommendation, matrix.names());
    }
    Ok(())
}
