use std::path::PathBuf;

use clap::Parser;

use crate::highscore::DEFAULT_HIGH_SCORE_FILE;

/// World size every simulation runs in; the terminal view is scaled from it.
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 800.0;

#[derive(Parser, Debug, Clone)]
#[command(name = "space_invaders", about = "Space Invaders in the terminal")]
pub struct Config {
    /// File holding the best score across sessions
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    pub high_score_file: PathBuf,

    /// Write diagnostics here (filtered by RUST_LOG, default "info")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Simulation and redraw rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,
}
