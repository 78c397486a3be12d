//! Configuration system for Homestead.
//!
//! Runtime settings persist to disk as RON files. CLI overrides come from
//! clap, and a reload call reports whether the file on disk changed. Every
//! section uses `#[serde(default)]` so older files keep loading.

mod cli;
mod color;
mod config;
mod error;

pub use cli::CliArgs;
pub use color::{hex_from_rgb, rgb_from_hex};
pub use config::{
    AudioConfig, CameraConfig, Config, DayNightConfig, DebugConfig, IntensityPair,
    PlacementConfig, SkyColors, Smoothing, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
