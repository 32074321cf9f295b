use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::config::CombatConfig;

/// Top-down: no gravity. The length unit comes from the combat config, so the
/// config must be inserted before this plugin is registered.
pub fn plugin(app: &mut App) {
    let ppm = app
        .world()
        .get_resource::<CombatConfig>()
        .map_or(CombatConfig::default().pixels_per_meter, |c| c.pixels_per_meter);
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
}
