//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `recoil_gunner::game::configure_headless` to install gameplay plugins.
//!
//! Time is advanced manually so every `update` runs at least one fixed step.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use recoil_gunner::common::config::CombatConfig;
use recoil_gunner::common::state::SessionPhase;
use recoil_gunner::plugins::player::{Player, PlayerInput};
use recoil_gunner::plugins::session::SessionCommand;

/// Slightly longer than the default fixed timestep (1/64 s).
pub const FRAME: Duration = Duration::from_micros(16_667);

fn base_app() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app
}

pub fn app_headless() -> App {
    let mut app = base_app();
    recoil_gunner::game::configure_headless(&mut app);
    // Run plugin `finish`/`cleanup` hooks as `App::run` would (avian inits resources there).
    app.finish();
    app.cleanup();
    app.update();
    app
}

pub fn app_with_config(config: CombatConfig) -> App {
    let mut app = base_app();
    recoil_gunner::game::configure_headless_with(&mut app, config).expect("valid config");
    // Run plugin `finish`/`cleanup` hooks as `App::run` would (avian inits resources there).
    app.finish();
    app.cleanup();
    app.update();
    app
}

pub fn tick(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn command(app: &mut App, command: SessionCommand) {
    app.world_mut().write_message(command);
    tick(app, 2);
}

pub fn phase(app: &App) -> SessionPhase {
    *app.world().resource::<State<SessionPhase>>().get()
}

pub fn set_input(app: &mut App, fire_held: bool, aim: Vec2) {
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput { fire_held, aim };
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}
