//! Command-line argument parsing for Homestead.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Homestead command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "homestead", about = "Homestead farming sandbox")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Clock multiplier (0 pauses the day/night cycle).
    #[arg(long)]
    pub time_scale: Option<f32>,

    /// Starting hour of the day, 0-24.
    #[arg(long)]
    pub start_hour: Option<f32>,

    /// Real seconds per in-game day.
    #[arg(long)]
    pub day_duration: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding `prefabs.ron` and `level.ron`.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Number of frames to simulate before exiting.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(scale) = args.time_scale {
            self.day_night.time_scale = scale;
        }
        if let Some(hour) = args.start_hour {
            self.day_night.start_hour = hour;
        }
        if let Some(secs) = args.day_duration {
            self.day_night.day_duration_secs = secs;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
