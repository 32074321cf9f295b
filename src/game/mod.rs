//! Game composition root.
//!
//! Provides the public configuration functions:
//! - `run`: the windowed game, config read from `RECOIL_GUNNER_CONFIG` if set.
//! - `configure_full`: DefaultPlugins (window/render) + game plugins.
//! - `configure_headless` / `configure_headless_with`: no window, for integration tests.
//!
//! The combat config is validated before anything reads it; an invalid config
//! never reaches the simulation.

use std::env;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::config::{CombatConfig, ConfigError};
use crate::common::state::SessionPhase;
use crate::plugins;
use crate::plugins::session::{FileHighScoreStore, HighScores};

// Only compile these imports on Windows.
#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Environment variable naming a RON config file.
pub const CONFIG_ENV: &str = "RECOIL_GUNNER_CONFIG";

pub fn run() -> AppExit {
    let mut app = App::new();
    app.add_plugins(default_plugins());

    let config = match config_from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid combat config: {err}");
            return AppExit::error();
        }
    };
    if let Err(err) = configure_game_with(&mut app, config) {
        error!("Invalid combat config: {err}");
        return AppExit::error();
    }

    match FileHighScoreStore::in_user_data_dir() {
        Ok(store) => {
            info!("High scores stored at {}", store.path().display());
            app.insert_resource(HighScores::new(store));
        }
        Err(err) => warn!("High scores will not persist: {err}"),
    }

    plugins::register_render(&mut app);
    app.run()
}

/// Config from the file named by [`CONFIG_ENV`], or the defaults.
pub fn config_from_env() -> Result<CombatConfig, ConfigError> {
    match env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("Loading combat config from {}", path.to_string_lossy());
            CombatConfig::load(path)
        }
        None => Ok(CombatConfig::default()),
    }
}

fn default_plugins() -> bevy::app::PluginGroupBuilder {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Recoil Gunner".into(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    });

    // Vulkan is unreliable on some Windows drivers: force DX12 on a high-performance adapter.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    default_plugins
}

/// Full configuration with the default combat config.
pub fn configure_full(app: &mut App) {
    app.add_plugins(default_plugins());
    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (Firefly/camera/input).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Headless configuration with an explicit config, validated first.
pub fn configure_headless_with(app: &mut App, config: CombatConfig) -> Result<(), ConfigError> {
    configure_game_with(app, config)
}

fn configure_game_with(app: &mut App, config: CombatConfig) -> Result<(), ConfigError> {
    config.validate()?;
    app.insert_resource(config);
    configure_game(app);
    Ok(())
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<SessionPhase>();
    plugins::register_gameplay(app);
}
