use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::clock::CombatClock;
use crate::common::config::CombatConfig;
use crate::common::layers::Layer;
use crate::common::state::SessionPhase;
use crate::plugins::core::PendingDespawn;

use super::components::Projectile;
use super::messages::SpawnProjectileRequest;

#[inline]
pub fn active_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [Layer::World, Layer::Enemy])
}

/// Membership kept, filters cleared: the body stops generating contacts.
#[inline]
pub fn inert_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [] as [Layer; 0])
}

/// Count down lifetimes.
pub fn advance_projectiles(clock: Res<CombatClock>, mut q: Query<&mut Projectile>) {
    let dt = clock.delta();
    for mut projectile in &mut q {
        projectile.advance(dt);
    }
}

/// Spent projectiles stop moving and colliding now, and are despawned after the fixed step.
pub fn retire_spent_projectiles(
    mut commands: Commands,
    mut q: Query<
        (Entity, &Projectile, &mut LinearVelocity, &mut CollisionLayers),
        Without<PendingDespawn>,
    >,
) {
    for (e, projectile, mut vel, mut layers) in &mut q {
        if projectile.is_active() {
            continue;
        }
        vel.0 = Vec2::ZERO;
        *layers = inert_projectile_layers();
        commands.entity(e).insert(PendingDespawn);
    }
}

/// Consumer: one entity per spawn request.
pub fn spawn_requested_projectiles(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut reader: MessageReader<SpawnProjectileRequest>,
) {
    let radius = config.projectile.radius;

    for req in reader.read() {
        commands.spawn((
            Name::new("Projectile"),
            Projectile::new(req.damage, req.ttl, req.destroy_on_hit, req.owner),
            Sprite {
                color: Color::srgb(1.0, 0.85, 0.3),
                custom_size: Some(Vec2::splat(radius * 2.0)),
                ..default()
            },
            Transform::from_translation(req.pos.extend(2.0)),
            RigidBody::Dynamic,
            Collider::circle(radius),
            Sensor,
            active_projectile_layers(),
            LinearVelocity(req.vel),
            // Avian only emits CollisionStart if one of the colliders has this marker.
            CollisionEventsEnabled,
            DespawnOnExit(SessionPhase::GameOver),
        ));
    }
}
