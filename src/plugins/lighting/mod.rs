//! Lighting plugin (Firefly) (render-only).
//!
//! One light rides on the player; every enemy casts a shadow.

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::config::CombatConfig;
use crate::plugins::enemies::Enemy;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(Startup, setup)
        .add_systems(Update, (follow_player_light, add_enemy_occluders));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
}

fn follow_player_light(
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}

fn add_enemy_occluders(
    mut commands: Commands,
    config: Res<CombatConfig>,
    q_new: Query<Entity, Added<Enemy>>,
) {
    for e in &q_new {
        commands.entity(e).insert(Occluder2d::circle(config.enemy.radius));
    }
}
