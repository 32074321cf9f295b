//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod enemies;
pub mod health;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod waves;
pub mod weapon;
pub mod world;

// Render-only
pub mod camera;
pub mod feedback;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    session::plugin(app);
    world::plugin(app);
    player::plugin(app);
    weapon::plugin(app);
    projectiles::plugin(app);
    enemies::plugin(app);
    waves::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    feedback::plugin(app);
    player::input::plugin(app);
}
