//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Day/night cycle settings.
    pub day_night: DayNightConfig,
    /// Drag-and-drop placement settings.
    pub placement: PlacementConfig,
    /// Base camera pose.
    pub camera: CameraConfig,
    /// Audio settings.
    pub audio: AudioConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// A day value and a night value for one light channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IntensityPair {
    pub day: f32,
    pub night: f32,
}

/// Sky color targets per lighting period, as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SkyColors {
    pub day: u32,
    pub night: u32,
    pub sunrise: u32,
    pub sunset: u32,
}

/// How smoothed lighting values approach their targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Smoothing {
    /// Lerp by a fixed factor on every tick, regardless of frame time.
    FixedFactor(f32),
    /// Lerp by `1 - exp(-rate * dt)`, independent of frame rate.
    Exponential { rate: f32 },
}

/// Day/night cycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DayNightConfig {
    /// Real seconds for one full 24-hour in-game day at time scale 1.
    pub day_duration_secs: f32,
    /// Clock value at startup, in hours.
    pub start_hour: f32,
    /// Initial time multiplier.
    pub time_scale: f32,
    /// Ambient light intensity targets.
    pub ambient_intensity: IntensityPair,
    /// Sun (directional) light intensity targets.
    pub directional_intensity: IntensityPair,
    /// Sky color targets.
    pub sky_colors: SkyColors,
    /// Lighting smoothing rule.
    pub smoothing: Smoothing,
    /// Distance of the sun from the scene origin.
    pub sun_distance: f32,
    /// Sun tint between 06:00 and 18:00.
    pub sun_day_color: u32,
    /// Sun tint outside daylight hours.
    pub sun_dusk_color: u32,
}

/// Drag-and-drop placement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Prefab collection that palette and window drops resolve against.
    pub collection: String,
    /// Vertical lift applied to placed objects to avoid z-fighting.
    pub surface_offset: f32,
    /// Object id fragments that select the deep-clone path.
    pub livestock: Vec<String>,
    /// Local offset given to every mesh of a deep clone.
    pub deep_clone_offset: (f32, f32, f32),
    /// Duration of the palette scale-in animation in seconds.
    pub scale_in_secs: f32,
    /// Overshoot of the back-out easing curve.
    pub back_overshoot: f32,
}

/// Base camera pose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space position.
    pub position: (f32, f32, f32),
    /// XYZ Euler rotation in radians.
    pub rotation: (f32, f32, f32),
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

/// Audio configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0).
    pub master_volume: f32,
    /// Theme music volume (0.0 - 1.0).
    pub music_volume: f32,
    /// Start muted.
    pub muted: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every prefab collection after the registry is built.
    pub log_prefabs: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "Homestead".to_string(),
        }
    }
}

impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            day_duration_secs: 300.0,
            start_hour: 6.0,
            time_scale: 1.0,
            ambient_intensity: IntensityPair {
                day: 1.5,
                night: 0.1,
            },
            directional_intensity: IntensityPair {
                day: 2.0,
                night: 0.05,
            },
            sky_colors: SkyColors {
                day: 0x87ceeb,
                night: 0x0a0a1a,
                sunrise: 0xff7f50,
                sunset: 0xff6b35,
            },
            smoothing: Smoothing::FixedFactor(0.05),
            sun_distance: 50.0,
            sun_day_color: 0xffffff,
            sun_dusk_color: 0xffe5cc,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            collection: "objects".to_string(),
            surface_offset: 0.01,
            livestock: vec!["cow".into(), "sheep".into(), "chicken".into()],
            deep_clone_offset: (2.0, 0.4, 2.0),
            scale_in_secs: 2.0,
            back_overshoot: 1.7,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: (-108.0, 89.0, 117.0),
            rotation: (-0.67, -0.64, -0.42),
            fov_y_degrees: 20.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 0.5,
            muted: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_prefabs: false,
        }
    }
}

/// Platform config directory for Homestead, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("homestead"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let new_config = read_config(&config_path)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
