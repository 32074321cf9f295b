//! World plugin: arena walls and floor, rebuilt for every session.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::config::{ArenaConfig, CombatConfig};
use crate::common::layers::Layer;
use crate::common::state::SessionPhase;
use crate::plugins::session::BeginSession;

const TILE: f32 = 64.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct Wall;

pub fn plugin(app: &mut App) {
    app.add_systems(BeginSession, (spawn_arena, spawn_floor));
}

#[inline]
pub fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy, Layer::PlayerBullet])
}

/// Centre and size of the four walls enclosing the arena, outside its bounds.
pub fn wall_rects(arena: &ArenaConfig) -> [(&'static str, Vec2, Vec2); 4] {
    let t = arena.wall_thickness;
    let (hw, hh) = (arena.half_width, arena.half_height);
    let horizontal = Vec2::new(hw * 2.0 + t * 2.0, t);
    let vertical = Vec2::new(t, hh * 2.0);

    [
        ("WallTop", Vec2::new(0.0, hh + t * 0.5), horizontal),
        ("WallBottom", Vec2::new(0.0, -hh - t * 0.5), horizontal),
        ("WallLeft", Vec2::new(-hw - t * 0.5, 0.0), vertical),
        ("WallRight", Vec2::new(hw + t * 0.5, 0.0), vertical),
    ]
}

pub fn spawn_arena(mut commands: Commands, config: Res<CombatConfig>) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);

    for (name, pos, size) in wall_rects(&config.arena) {
        commands.spawn((
            Name::new(name),
            Wall,
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers(),
            DespawnOnExit(SessionPhase::GameOver),
        ));
    }
}

/// Checkerboard of solid-color tiles covering the arena. No assets needed.
fn spawn_floor(mut commands: Commands, config: Res<CombatConfig>) {
    let nx = (config.arena.half_width / TILE).ceil() as i32;
    let ny = (config.arena.half_height / TILE).ceil() as i32;

    (-ny..=ny)
        .flat_map(|y| (-nx..=nx).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE)),
                Transform::from_xyz(x as f32 * TILE, y as f32 * TILE, -1.0),
                DespawnOnExit(SessionPhase::GameOver),
            ));
        });
}
