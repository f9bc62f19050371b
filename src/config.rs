//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "skyfall", version, about = "Dodge, shoot and collect in your terminal")]
pub struct Args {
    /// Frames per second of the game loop.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Virtual pixels per terminal column.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub cell_width: u16,

    /// Virtual pixels per terminal row.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub cell_height: u16,

    /// Seed for spawns and special shots; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (stderr is the game screen).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime settings.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub frame: Duration,
    pub cell_width: f32,
    pub cell_height: f32,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame: frame_period(60),
            cell_width: 10.0,
            cell_height: 20.0,
            seed: None,
            log_file: None,
        }
    }
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        GameConfig {
            frame: frame_period(args.fps),
            cell_width: args.cell_width as f32,
            cell_height: args.cell_height as f32,
            seed: args.seed,
            log_file: args.log_file,
        }
    }
}

impl GameConfig {
    /// Canvas size in virtual pixels for a terminal of `cols × rows`.
    pub fn canvas_size(&self, cols: u16, rows: u16) -> (f32, f32) {
        (cols as f32 * self.cell_width, rows as f32 * self.cell_height)
    }
}

fn frame_period(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}
