//! Enemies plugin: chasers that stop at arm's length and hit the player.
//!
//! Enemy entities are created by the wave director through [`spawn_enemy`].
//!
//! Fixed-step work:
//! - `CombatSet::Enemies`: [`drive_enemies`] steps every [`EnemyAi`] against
//!   the player's position and applies attacks through the damage model.
//! - `CombatSet::Resolve`: [`resolve_enemy_deaths`] turns a dead `Health`
//!   into a score award, exactly once, and schedules the despawn.
//!
//! A dead enemy is frozen and made non-interacting in the same tick it dies,
//! so no later system observes it moving or blocking bullets.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::clock::CombatClock;
use crate::common::config::{CombatConfig, EnemyConfig};
use crate::common::events::CombatEvent;
use crate::common::layers::Layer;
use crate::common::sets::CombatSet;
use crate::common::state::SessionPhase;
use crate::plugins::core::PendingDespawn;
use crate::plugins::health::{self, Health};
use crate::plugins::player::Player;
use crate::plugins::session::Score;

pub mod ai;

pub use ai::{AiDecision, AiState, EnemyAi};

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub score_value: u32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedPostUpdate, drive_enemies.in_set(CombatSet::Enemies))
        .add_systems(FixedPostUpdate, resolve_enemy_deaths.in_set(CombatSet::Resolve));
}

#[inline]
fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player, Layer::Enemy, Layer::PlayerBullet])
}

/// Membership kept, filters cleared.
#[inline]
pub fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

pub fn spawn_enemy(commands: &mut Commands, cfg: &EnemyConfig, pos: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("Enemy"),
            Enemy { score_value: cfg.score_value },
            EnemyAi::default(),
            Health::new(cfg.max_health, cfg.invulnerability_duration),
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(Vec2::splat(cfg.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            (
                RigidBody::Dynamic,
                Collider::circle(cfg.radius),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::ZERO,
                enemy_layers(),
            ),
            DespawnOnExit(SessionPhase::GameOver),
        ))
        .id()
}

pub fn drive_enemies(
    config: Res<CombatConfig>,
    clock: Res<CombatClock>,
    mut q_enemies: Query<
        (&Transform, &Health, &mut EnemyAi, &mut LinearVelocity),
        (With<Enemy>, Without<Player>),
    >,
    mut q_player: Query<(Entity, &Transform, &mut Health), (With<Player>, Without<Enemy>)>,
    mut events: MessageWriter<CombatEvent>,
) {
    let cfg = &config.enemy;
    let now = clock.now();

    let mut player = q_player.single_mut().ok();
    let target = player.as_ref().map(|(_, tf, _)| tf.translation.truncate());

    for (tf, hp, mut ai, mut vel) in &mut q_enemies {
        if hp.is_dead() {
            vel.0 = Vec2::ZERO;
            continue;
        }

        let decision = ai.think(tf.translation.truncate(), target, now, cfg);
        vel.0 = decision.velocity;

        if !decision.attack {
            continue;
        }
        if let Some((player_e, _, player_hp)) = player.as_mut() {
            health::damage(*player_e, &mut **player_hp, cfg.attack_damage, now, &mut events);
        }
    }
}

pub fn resolve_enemy_deaths(
    mut commands: Commands,
    mut score: ResMut<Score>,
    mut q: Query<
        (Entity, &Enemy, &Health, &mut LinearVelocity, &mut CollisionLayers),
        Without<PendingDespawn>,
    >,
    mut events: MessageWriter<CombatEvent>,
) {
    for (e, enemy, hp, mut vel, mut layers) in &mut q {
        if hp.is_alive() {
            continue;
        }

        vel.0 = Vec2::ZERO;
        *layers = non_interacting_enemy_layers();
        commands.entity(e).insert(PendingDespawn);

        let total = score.award(enemy.score_value);
        debug!("Enemy {e} defeated, +{} (score {total})", enemy.score_value);
        events.write(CombatEvent::ScoreChanged { score: total });
    }
}

/// Enemies that still count toward the current wave.
pub fn live_enemy_count<'a>(healths: impl IntoIterator<Item = &'a Health>) -> usize {
    healths.into_iter().filter(|h| h.is_alive()).count()
}
