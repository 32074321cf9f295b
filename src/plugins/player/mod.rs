//! Player plugin.
//!
//! The player is a dynamic body that only moves by recoil: the weapon adds
//! impulses to its `LinearVelocity`, avian damps and caps the drift.
//!
//! Input is sampled by [`input`] (interactive apps only) into the
//! [`PlayerInput`] resource, which is all the fixed-step systems read.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::config::CombatConfig;
use crate::common::layers::Layer;
use crate::common::state::SessionPhase;
use crate::plugins::health::Health;
use crate::plugins::session::BeginSession;
use crate::plugins::weapon::ChargeWeapon;

pub mod input;

pub use input::PlayerInput;

#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_systems(BeginSession, spawn_player);
}

pub fn spawn_player(mut commands: Commands, config: Res<CombatConfig>) {
    let cfg = &config.player;
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Health::new(cfg.max_health, cfg.invulnerability_duration),
        ChargeWeapon::default(),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(cfg.radius * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        (
            RigidBody::Dynamic,
            Collider::circle(cfg.radius),
            Mass(cfg.mass),
            LockedAxes::ROTATION_LOCKED,
            LinearDamping(cfg.linear_damping),
            MaxLinearSpeed(cfg.max_speed),
            LinearVelocity::ZERO,
            layers,
            // Rendered between fixed steps.
            TranslationExtrapolation,
        ),
        DespawnOnExit(SessionPhase::GameOver),
    ));
}
