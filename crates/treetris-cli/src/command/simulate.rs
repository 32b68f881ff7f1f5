use std::path::PathBuf;

use rand::Rng as _;
use treetris_engine::{PlacementGenerator, PlacementSeed, Playfield};

use crate::{schema::RunSummary, util::save_json};

pub(crate) const DEFAULT_WIDTH: u16 = 9;
pub(crate) const DEFAULT_HEIGHT: u16 = 19;
const DEFAULT_PLACEMENTS: usize = 1000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Largest column index (the grid has `width + 1` columns)
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub(crate) width: u16,
    /// Largest row index (the grid has `height + 1` rows)
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub(crate) height: u16,
    /// Maximum number of placements to drop
    #[arg(long, default_value_t = DEFAULT_PLACEMENTS)]
    pub(crate) placements: usize,
    /// 32-character hex seed; random when omitted
    #[arg(long)]
    pub(crate) seed: Option<PlacementSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SimulateArg {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            placements: DEFAULT_PLACEMENTS,
            seed: None,
            output: None,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!(
        "Simulating up to {} placements on a {}x{} grid (seed {seed})...",
        arg.placements,
        u32::from(arg.width) + 1,
        u32::from(arg.height) + 1,
    );

    let summary = simulate(seed, arg.width, arg.height, arg.placements)?;
    eprintln!(
        "Settled {} placements, cleared {} rows, score {}{}",
        summary.stats.completed_placements(),
        summary.stats.total_cleared_rows(),
        summary.stats.score(),
        if summary.topped_out { " (topped out)" } else { "" },
    );

    save_json(&summary, arg.output.as_deref())
}

pub(crate) fn simulate(
    seed: PlacementSeed,
    width: u16,
    height: u16,
    placements: usize,
) -> anyhow::Result<RunSummary> {
    let mut field = Playfield::new(width, height);
    let mut topped_out = false;
    for placement in PlacementGenerator::with_seed(seed, width).take(placements) {
        if field.is_colliding(&placement) {
            topped_out = true;
            break;
        }
        field.hard_drop_and_settle(&placement)?;
    }
    Ok(RunSummary::new(Some(seed), &field, topped_out))
}
