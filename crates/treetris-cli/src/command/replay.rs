use std::path::PathBuf;

use anyhow::Context as _;
use treetris_engine::Playfield;

use crate::{
    schema::{ReplayFile, RunSummary},
    util::{read_json_file, save_json},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Replay file to read
    #[arg(long)]
    input: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let replay: ReplayFile = read_json_file("replay", &arg.input)?;
    eprintln!(
        "Replaying {} placements from {}...",
        replay.placements.len(),
        arg.input.display()
    );

    let summary = replay_placements(&replay)?;
    eprintln!(
        "Cleared {} rows, score {}",
        summary.stats.total_cleared_rows(),
        summary.stats.score()
    );

    save_json(&summary, arg.output.as_deref())
}

pub(crate) fn replay_placements(replay: &ReplayFile) -> anyhow::Result<RunSummary> {
    let mut field = Playfield::new(replay.width, replay.height);
    for (i, placement) in replay.placements.iter().enumerate() {
        let result = if replay.hard_drop {
            field.hard_drop_and_settle(placement)
        } else {
            field.settle(placement)
        };
        result.with_context(|| format!("Failed to settle placement #{i}: {placement:?}"))?;
    }
    Ok(RunSummary::new(None, &field, false))
}
