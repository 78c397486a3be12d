//! Homestead: headless farming sandbox demo.
//!
//! Loads config and assets, builds the static farm, drags a few objects off
//! the palette onto the ground, and runs the day/night clock for a bounded
//! number of frames.
//!
//! Run with: `cargo run -p homestead-game -- --frames 600`

use std::path::{Path, PathBuf};

use clap::Parser;
use glam::Vec2;
use homestead_config::{CliArgs, Config, default_config_dir};
use homestead_game::{Game, format_hud};
use homestead_placement::{
    DragState, DropSource, LevelLayout, Palette, PlacementRequest, PrefabRegistry,
};
use tracing::{error, info, warn};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let (mut config, load_error) = match config_dir.as_deref() {
        Some(dir) => match Config::load_or_create(dir) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => (Config::default(), None),
    };
    config.apply_cli_overrides(&args);

    homestead_log::init_logging(None, cfg!(debug_assertions), Some(&config));
    if let Some(e) = load_error {
        warn!("Using default config: {e}");
    }

    info!("Homestead");
    info!(
        "Viewport: {}x{} | Day length: {}s | Time scale: {}",
        config.window.width,
        config.window.height,
        config.day_night.day_duration_secs,
        config.day_night.time_scale
    );

    let assets = args.assets.clone().unwrap_or_else(default_assets_dir);
    let registry = match PrefabRegistry::from_ron(&assets.join("prefabs.ron")) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load prefabs from {}: {e}", assets.display());
            std::process::exit(1);
        }
    };
    let layout = match LevelLayout::from_ron(&assets.join("level.ron")) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("No level layout loaded ({e}), starting with bare ground");
            LevelLayout::default()
        }
    };
    info!("Loaded {} prefabs", registry.prefab_count());

    let mut game = Game::new(&config, registry, &layout);
    queue_demo_drops(&mut game, &config);

    let report_every = (args.frames / 10).max(1);
    for frame in 1..=args.frames {
        game.run_frame(FRAME_DT);
        if frame % report_every == 0 {
            info!("Frame {frame}: {}", format_hud(game.hud()));
        }
    }

    let placement = game.placement();
    info!(
        "Finished {} frames: {} objects ({} meshes), {} still animating, sky #{:06x}",
        args.frames,
        placement.scene.len(),
        placement.scene.mesh_count(),
        placement.tweens.len(),
        game.day_night().sky_color_hex()
    );
}

fn default_assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Drag livestock and crops from the palette to spots on the farm, plus one
/// window drop.
fn queue_demo_drops(game: &mut Game, config: &Config) {
    let palette = Palette::default();
    let center = Vec2::new(
        config.window.width as f32 * 0.5,
        config.window.height as f32 * 0.5,
    );
    let mut drag = DragState::new();

    for (id, target) in [
        ("cow", center),
        ("sheep", center + Vec2::new(-120.0, 40.0)),
        ("chicken003", center + Vec2::new(90.0, -60.0)),
        ("corn_2", center + Vec2::new(200.0, 80.0)),
    ] {
        let Some(entry) = palette.get(id) else {
            continue;
        };
        drag.begin(entry, Vec2::new(palette.button_size * 0.5, palette.button_size * 0.5));
        drag.update((center + target) * 0.5);
        if let Some(intent) = drag.end(target) {
            game.queue_intent(intent);
        }
    }

    game.queue_drop(PlacementRequest {
        object_id: "fence".into(),
        screen: center + Vec2::new(-250.0, -30.0),
        source: DropSource::Window,
    });
}
