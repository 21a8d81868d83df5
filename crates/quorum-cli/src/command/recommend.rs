use std::path::PathBuf;

use clap::Args;
use quorum_search::{Recommender, SearchConfig};

use crate::{command::ModelArg, render, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct RecommendArg {
    #[command(flatten)]
    model: ModelArg,

    /// Largest schedule length to explore
    #[arg(long, default_value_t = 3)]
    max_size: usize,

    /// Fraction of the single-best-slot participation average a larger
    /// schedule must retain
    #[arg(long, default_value_t = 1.0)]
    participation_limit: f64,

    /// Fraction of the single-best-slot interaction average a larger
    /// schedule must retain
    #[arg(long, default_value_t = 1.0)]
    interaction_limit: f64,

    /// Skip schedules containing slots far below the best quorum probability
    /// (heuristic; may in principle change results)
    #[arg(long)]
    prune: bool,

    /// Print the full per-person and per-pair probability tables
    #[arg(long)]
    full: bool,

    /// Emit all recommendations as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Output file for --json (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RecommendArg) -> anyhow::Result<()> {
    let (matrix, model) = arg.model.build()?;
    let config = SearchConfig {
        meetings: arg.model.meetings,
        max_schedule_size: arg.max_size,
        participation_limit: arg.participation_limit,
        interaction_limit: arg.interaction_limit,
        prune: arg.prune,
    };
    config.validate()?;

    let recommender = Recommender::new(&model, config);

    if arg.json {
        let recommendations: Vec<_> = recommender.collect();
        util::save_json(&recommendations, arg.output.as_deref())?;
        return Ok(());
    }

    for recommendation in recommender {
        if arg.full {
            render::print_full(&recommendation, matrix.names());
        } else {
            println!("{}", render::format_short(&recommendation));
        }
    }
    Ok(())
}
